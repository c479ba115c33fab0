use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_unit_samples_stay_in_range() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_unit();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn fixed_sequence_cycles_and_counts() {
    let mut seq = FixedSequence::new(vec![0.1, 0.2]);
    assert_eq!(seq.next_unit(), 0.1);
    assert_eq!(seq.next_unit(), 0.2);
    assert_eq!(seq.next_unit(), 0.1);
    assert_eq!(seq.draws(), 3);
}

#[test]
fn empty_sequence_is_centered() {
    let mut seq = FixedSequence::default();
    assert_eq!(seq.next_unit(), 0.5);
}

#[test]
fn rand_adapter_stays_in_range() {
    let mut src = ThreadRandom::new();
    for _ in 0..100 {
        let v = src.next_unit();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn boxed_source_forwards() {
    let mut boxed: Box<dyn RandomSource> = Box::new(FixedSequence::constant(0.25));
    assert_eq!(boxed.next_unit(), 0.25);
}
