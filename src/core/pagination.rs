/// Current page of a listing. Never drops below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// No upper bound: the presentation layer disables this on short pages.
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Restart from page 1 when what is being listed changes.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn is_first(&self) -> bool {
        self.page == 1
    }
}
