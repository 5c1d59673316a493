//! Fisher-Yates shuffle used to randomize team order before generating fixtures.

use rand::Rng;

/// Shuffle `items` in place with the given random source.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly chosen
/// index in `[0, index]`.
pub fn shuffle_with<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for index in (1..items.len()).rev() {
        let other = rng.gen_range(0..=index);
        items.swap(index, other);
    }
}

/// Shuffle `items` in place using the thread-local generator.
pub fn shuffle_array<T>(items: &mut [T]) {
    shuffle_with(items, &mut rand::thread_rng());
}
