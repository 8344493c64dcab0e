use std::ops::RangeInclusive;

use crate::domain::entities::page::PaginationState;

pub const PAGE_LINKS: u32 = 5;

/// Page numbers to show as links, centred on the current page where possible.
pub fn page_window(current: u32, page_count: u32, links: u32) -> RangeInclusive<u32> {
    if page_count == 0 || links == 0 {
        return 1..=0;
    }
    let links = links.min(page_count);
    let current = current.clamp(1, page_count);
    let half = links / 2;
    let start = current
        .saturating_sub(half)
        .max(1)
        .min(page_count - links + 1);
    start..=start + links - 1
}

pub fn report(pagination: &PaginationState) -> String {
    format!(
        "Showing {} to {} of {} entries",
        pagination.first_row(),
        pagination.last_row(),
        pagination.total_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    #[test]
    fn window_is_centred_and_clamped() {
        assert_eq!(page_window(1, 10, 5), 1..=5);
        assert_eq!(page_window(6, 10, 5), 4..=8);
        assert_eq!(page_window(10, 10, 5), 6..=10);
        assert_eq!(page_window(2, 3, 5), 1..=3);
        assert!(page_window(1, 0, 5).is_empty());
    }

    #[test]
    fn report_describes_visible_rows() {
        let mut pagination = PaginationState::new(NonZeroU32::new(12).expect("non-zero"));
        pagination.set_total(50);
        pagination.navigate(24, pagination.page_size());

        assert_eq!(report(&pagination), "Showing 25 to 36 of 50 entries");
    }
}
