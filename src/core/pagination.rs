/// Returns the 1-based `page` of `items`, `page_size` elements at a time.
///
/// Pages outside the sequence, page 0 included, yield an empty slice.
pub fn paginate<T>(items: &[T], page: u32, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }

    let start = match (page as usize - 1).checked_mul(page_size) {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
