//! Offset/limit pagination over an already filtered collection.

/// A slice of records together with the number of records before slicing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records inside the requested window, in input order.
    pub items: Vec<T>,
    /// Number of records that matched before the window was applied.
    pub total: usize,
}

/// Slice `records` to the window `[skip, skip + limit)`.
///
/// Range checks on `skip` and `limit` belong to the caller. A window that starts past the end
/// yields an empty page rather than an error.
pub fn paginate<T>(records: Vec<T>, skip: usize, limit: usize) -> Page<T> {
    let total = records.len();
    let items = records.into_iter().skip(skip).take(limit).collect();
    Page { items, total }
}
