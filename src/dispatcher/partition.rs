//! Round-robin work partitioning.

/// Deal `items` into at most `buckets` buckets: item `i` goes to bucket
/// `i % buckets`, relative order is kept inside each bucket and empty buckets
/// are dropped. Bucket sizes differ by at most one.
///
/// ```rust
/// use beatmap_sampler::dispatcher::round_robin;
///
/// let buckets = round_robin(vec![1, 2, 3, 4, 5], 2);
/// assert_eq!(buckets, vec![vec![1, 3, 5], vec![2, 4]]);
/// ```
pub fn round_robin<T>(items: Vec<T>, buckets: usize) -> Vec<Vec<T>> {
    let buckets = buckets.max(1);
    let mut chunks: Vec<Vec<T>> = (0..buckets).map(|_| Vec::new()).collect();
    for (idx, item) in items.into_iter().enumerate() {
        chunks[idx % buckets].push(item);
    }
    chunks.retain(|chunk| !chunk.is_empty());
    chunks
}
