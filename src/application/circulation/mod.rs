mod borrow_service;
mod errors;
mod late_fee;
mod return_service;
mod status_report;

pub use borrow_service::{BorrowReceipt, MAX_ACTIVE_LOANS, borrow_book_by_patron};
pub use errors::{CirculationError, Result};
pub use late_fee::calculate_late_fee_for_book;
pub use return_service::{ReturnReceipt, return_book_by_patron};
pub use status_report::{
    BorrowingHistoryEntry, CurrentlyBorrowed, StatusReport, get_patron_status_report,
};
