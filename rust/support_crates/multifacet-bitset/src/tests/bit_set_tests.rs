use itertools::Itertools;

use crate::bit_set::BitSet;

#[test]
fn test_bit_set_iter() {
    // Empty set
    let empty = BitSet::empty(10);
    let positions: Vec<usize> = empty.iter().collect();
    assert_eq!(positions, Vec::<usize>::new());

    // Single bit set
    let mut single = BitSet::empty(10);
    single.set(5);
    let positions: Vec<usize> = single.iter().collect();
    assert_eq!(positions, vec![5]);

    // Multiple bits in a single word
    let mut multi = BitSet::empty(20);
    multi.set(0);
    multi.set(3);
    multi.set(7);
    multi.set(11);
    multi.set(19);
    let positions: Vec<usize> = multi.iter().collect();
    assert_eq!(positions, vec![0, 3, 7, 11, 19]);

    // Across word boundaries
    let mut cross_word = BitSet::empty(150);
    cross_word.set(0);
    cross_word.set(63);
    cross_word.set(64);
    cross_word.set(65);
    cross_word.set(127);
    cross_word.set(128);
    cross_word.set(149);
    let positions: Vec<usize> = cross_word.iter().collect();
    assert_eq!(positions, vec![0, 63, 64, 65, 127, 128, 149]);

    // Iterator can be consumed repeatedly
    let reuse = BitSet::from_positions([2usize, 5, 8].into_iter(), 10);
    let first_pass: Vec<usize> = reuse.iter().collect();
    let second_pass: Vec<usize> = reuse.iter().collect();
    assert_eq!(first_pass, vec![2, 5, 8]);
    assert_eq!(second_pass, vec![2, 5, 8]);
}

#[test]
fn test_bit_set_set_reset_contains() {
    let mut set = BitSet::empty(200);
    assert!(!set.contains(0));
    assert!(!set.contains(199));

    set.set(0);
    set.set(100);
    set.set(199);
    assert!(set.contains(0));
    assert!(set.contains(100));
    assert!(set.contains(199));
    assert!(!set.contains(1));
    assert!(!set.contains(101));

    set.reset(100);
    assert!(!set.contains(100));
    assert_eq!(set.count_ones(), 2);
}

#[test]
fn test_bit_set_count_ones() {
    assert_eq!(BitSet::empty(0).count_ones(), 0);
    assert_eq!(BitSet::empty(1000).count_ones(), 0);
    assert_eq!(BitSet::full(0).count_ones(), 0);
    assert_eq!(BitSet::full(64).count_ones(), 64);

    // Full set with a partial final word: tail bits must not be counted
    assert_eq!(BitSet::full(70).count_ones(), 70);
    assert_eq!(BitSet::full(129).count_ones(), 129);

    let positions = (0..500usize).filter(|i| i % 7 == 0).collect_vec();
    let set = BitSet::from_positions(positions.iter().copied(), 500);
    assert_eq!(set.count_ones(), positions.len());
}

#[test]
fn test_bit_set_and() {
    let left = BitSet::from_positions([1usize, 5, 64, 100, 149].into_iter(), 150);
    let right = BitSet::from_positions([5usize, 64, 101, 149].into_iter(), 150);

    let result = &left & &right;
    let positions: Vec<usize> = result.iter().collect();
    assert_eq!(positions, vec![5, 64, 149]);
    assert_eq!(result.count_ones(), 3);
    assert_eq!(left.and_cardinality(&right), 3);

    let mut assign = left.clone();
    assign &= &right;
    assert_eq!(assign, result);
}

#[test]
fn test_bit_set_or() {
    let left = BitSet::from_positions([1usize, 64].into_iter(), 100);
    let right = BitSet::from_positions([2usize, 64, 99].into_iter(), 100);

    let result = &left | &right;
    let positions: Vec<usize> = result.iter().collect();
    assert_eq!(positions, vec![1, 2, 64, 99]);

    let mut assign = left.clone();
    assign |= &right;
    assert_eq!(assign, result);
}

#[test]
fn test_bit_set_and_cardinality_matches_materialized() {
    let left = BitSet::from_positions((0..300usize).filter(|i| i % 3 == 0), 300);
    let right = BitSet::from_positions((0..300usize).filter(|i| i % 5 == 0), 300);
    assert_eq!(left.and_cardinality(&right), (&left & &right).count_ones());
}

#[test]
#[should_panic]
fn test_bit_set_and_length_mismatch_panics() {
    let left = BitSet::empty(10);
    let right = BitSet::empty(11);
    let _ = &left & &right;
}
