mod bit_set_tests;
