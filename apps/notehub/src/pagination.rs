/// Pages shown on each side of the current one before collapsing into a gap.
const PAGE_RANGE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
	Page { number: u32, active: bool },
	Gap,
}

/// Paginator state for a list of `page_count` pages. Callers speak 1-indexed page numbers; the
/// 0-indexed `selected` values of the widget are converted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
	page_count: u32,
	current_page: u32,
}
impl Pagination {
	/// `None` when there is nothing to paginate (`page_count <= 1`).
	pub fn new(page_count: u32, current_page: u32) -> Option<Self> {
		(page_count > 1).then_some(Self { page_count, current_page })
	}

	pub fn page_count(&self) -> u32 {
		self.page_count
	}

	pub fn current_page(&self) -> u32 {
		self.current_page
	}

	/// Widget selection for the current page, clamped so an out-of-range page still renders.
	pub fn force_page(&self) -> u32 {
		self.current_page.clamp(1, self.page_count) - 1
	}

	/// Converts a widget selection into the 1-indexed page to request.
	pub fn on_page_change(&self, selected: u32) -> u32 {
		selected.min(self.page_count - 1) + 1
	}

	pub fn next(&self) -> Option<u32> {
		let selected = self.force_page();

		(selected + 1 < self.page_count).then(|| self.on_page_change(selected + 1))
	}

	pub fn previous(&self) -> Option<u32> {
		let selected = self.force_page();

		(selected > 0).then(|| self.on_page_change(selected - 1))
	}

	pub fn items(&self) -> Vec<PageItem> {
		let active = self.force_page() + 1;
		let low = active.saturating_sub(PAGE_RANGE).max(1);
		let high = (active + PAGE_RANGE).min(self.page_count);
		let mut items = Vec::new();

		if low > 1 {
			items.push(PageItem::Page { number: 1, active: false });
		}
		if low > 2 {
			items.push(PageItem::Gap);
		}

		for number in low..=high {
			items.push(PageItem::Page { number, active: number == active });
		}

		if high + 1 < self.page_count {
			items.push(PageItem::Gap);
		}
		if high < self.page_count {
			items.push(PageItem::Page { number: self.page_count, active: false });
		}

		items
	}
}
