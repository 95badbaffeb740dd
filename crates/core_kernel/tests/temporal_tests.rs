//! Integration tests for CoverageWindow

use chrono::NaiveDate;
use core_kernel::CoverageWindow;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn consecutive_quarterly_windows_do_not_overlap() {
    let q1 = CoverageWindow::bounded(d(2024, 1, 1), d(2024, 4, 1)).unwrap();
    let q2 = CoverageWindow::bounded(d(2024, 4, 1), d(2024, 7, 1)).unwrap();

    assert!(!q1.overlaps(&q2));
    assert!(!q1.contains(d(2024, 4, 1)));
    assert!(q2.contains(d(2024, 4, 1)));
}

#[test]
fn every_date_belongs_to_at_most_one_consecutive_window() {
    let windows = [
        CoverageWindow::bounded(d(2024, 1, 1), d(2024, 4, 1)).unwrap(),
        CoverageWindow::bounded(d(2024, 4, 1), d(2024, 7, 1)).unwrap(),
        CoverageWindow::from(d(2024, 7, 1)),
    ];

    let mut date = d(2024, 1, 1);
    while date < d(2025, 1, 1) {
        let hits = windows.iter().filter(|w| w.contains(date)).count();
        assert_eq!(hits, 1, "date {date} covered by {hits} windows");
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn open_ended_window_overlaps_any_later_window() {
    let open = CoverageWindow::from(d(2024, 1, 1));
    let later = CoverageWindow::bounded(d(2030, 1, 1), d(2031, 1, 1)).unwrap();

    assert!(open.overlaps(&later));
    assert!(later.overlaps(&open));
}
