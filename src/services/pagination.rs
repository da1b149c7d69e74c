use crate::state::{PageEvent, SharedObserver};

/// Zero-based page index plus the page count reported by the last successful fetch.
pub struct PaginationCursor {
    current_page: u32,
    total_pages: u32,
    observer: SharedObserver,
}

impl PaginationCursor {
    pub fn new(observer: SharedObserver) -> Self {
        Self {
            current_page: 0,
            total_pages: 0,
            observer,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        self.emit();
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        self.emit();
        true
    }

    pub(crate) fn reset(&mut self) {
        if self.current_page != 0 {
            self.current_page = 0;
            self.emit();
        }
    }

    /// The current page is left where it is even if it now lies past the end.
    pub(crate) fn set_total_pages(&mut self, total_pages: u32) {
        if self.total_pages != total_pages {
            self.total_pages = total_pages;
            self.emit();
        }
    }

    pub fn label(&self) -> String {
        format!("{} of {}", self.current_page + 1, self.total_pages)
    }

    fn emit(&self) {
        self.observer.notify(&PageEvent::CursorChanged {
            current_page: self.current_page,
            total_pages: self.total_pages,
        });
    }
}
