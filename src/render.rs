//! TUI rendering for steme-core types.
//!
//! Extension traits that draw the calendar page and profile header with
//! owo_colors. Locale and layout settings come in through `Screen`, built
//! once from the loaded config.

use owo_colors::OwoColorize;
use steme_core::calendar::CalendarView;
use steme_core::config::{CalendarOptions, LocaleConfig};
use steme_core::date::{CalendarDate, MonthPage};
use steme_core::identity::{AvatarView, IdentityState};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self, screen: &Screen) -> String;
}

/// Immutable render settings.
pub struct Screen<'a> {
    pub locale: &'a LocaleConfig,
    pub options: &'a CalendarOptions,
}

/// One week row: `None` for blank cells.
pub type Week = [Option<CalendarDate>; 7];

/// Lay out a month page into week rows, starting on `first_day`.
/// Leading and trailing cells hold neighbouring months' days unless `hide_extra_days`.
pub fn month_rows(page: MonthPage, first_day: u8, hide_extra_days: bool) -> Vec<Week> {
    let first = page.first_day();
    let lead = (first.weekday_index() + 7 - first_day % 7) % 7;

    let mut cells: Vec<Option<CalendarDate>> = Vec::new();
    let mut prev_days: Vec<CalendarDate> = page.prev().days().collect();
    let lead_days = prev_days.split_off(prev_days.len().saturating_sub(lead as usize));
    cells.extend(lead_days.into_iter().map(|d| (!hide_extra_days).then_some(d)));
    cells.extend(page.days().map(Some));

    let mut next_days = page.next().days();
    while cells.len() % 7 != 0 {
        cells.push(next_days.next().filter(|_| !hide_extra_days));
    }

    cells
        .chunks(7)
        .map(|chunk| {
            let mut week: Week = [None; 7];
            week.copy_from_slice(chunk);
            week
        })
        .collect()
}

impl Render for CalendarView {
    fn render(&self, screen: &Screen) -> String {
        let page = self.visible_month();
        let first_day = screen.options.first_day % 7;
        let mut lines = Vec::new();

        let title = format!("{} {}", screen.locale.month_name(page.month()), page.year());
        lines.push(format!("{:^27}", title).bold().to_string());

        let header: Vec<String> = (0..7)
            .map(|i| {
                let weekday = (first_day + i) % 7;
                let name = format!("{:>3}", screen.locale.day_name_short(weekday));
                if self.disabled_weekdays().contains(weekday) {
                    name.dimmed().to_string()
                } else {
                    name
                }
            })
            .collect();
        lines.push(header.join(" "));

        for week in month_rows(page, first_day, screen.options.hide_extra_days) {
            let cells: Vec<String> = week
                .iter()
                .map(|cell| match cell {
                    Some(date) => self.render_day(date),
                    None => "   ".to_string(),
                })
                .collect();
            lines.push(cells.join(" "));
        }

        lines.join("\n")
    }
}

trait RenderDay {
    fn render_day(&self, date: &CalendarDate) -> String;
}

impl RenderDay for CalendarView {
    fn render_day(&self, date: &CalendarDate) -> String {
        let text = format!("{:>3}", date.day());

        if self.marked_dates().is_marked(date) {
            text.white().on_truecolor(0x93, 0x9c, 0xeb).to_string()
        } else if !self.visible_month().contains(date) || self.is_disabled(date) {
            text.dimmed().to_string()
        } else if *date == self.today() {
            text.bold().to_string()
        } else {
            text
        }
    }
}

impl Render for IdentityState {
    fn render(&self, _screen: &Screen) -> String {
        let avatar = match self.avatar() {
            AvatarView::Hidden => "   ".to_string(),
            AvatarView::Image(uri) => format!("🖼  {}", uri.dimmed()),
            AvatarView::Placeholder => format!("👤 {}", "(default picture)".dimmed()),
        };

        format!("{}\n{}", self.display_name().bold(), avatar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steme_core::calendar::DayPress;

    fn day(s: &str) -> Option<CalendarDate> {
        Some(CalendarDate::parse(s).unwrap())
    }

    #[test]
    fn test_march_2024_starting_sunday() {
        // 2024-03-01 is a Friday
        let rows = month_rows(MonthPage::new(3, 2024).unwrap(), 0, true);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0][..5], [None::<CalendarDate>; 5]);
        assert_eq!(rows[0][5], day("2024-03-01"));
        assert_eq!(rows[5][0], day("2024-03-31"));
        assert_eq!(rows[5][1..], [None::<CalendarDate>; 6]);
    }

    #[test]
    fn test_extra_days_fill_from_neighbouring_months() {
        let rows = month_rows(MonthPage::new(3, 2024).unwrap(), 0, false);

        assert_eq!(rows[0][0], day("2024-02-25"));
        assert_eq!(rows[0][4], day("2024-02-29"));
        assert_eq!(rows[5][6], day("2024-04-06"));
    }

    #[test]
    fn test_monday_start_shifts_leading_cells() {
        // 2024-04-01 is a Monday
        let rows = month_rows(MonthPage::new(4, 2024).unwrap(), 1, true);

        assert_eq!(rows[0][0], day("2024-04-01"));
        assert_eq!(rows.len(), 5);
    }

    fn highlighted(text: &str) -> String {
        text.white().on_truecolor(0x93, 0x9c, 0xeb).to_string()
    }

    #[test]
    fn test_calendar_page_marks_selection_and_greys_out_today_weekday() {
        let locale = LocaleConfig::default();
        let options = CalendarOptions::default();
        let screen = Screen {
            locale: &locale,
            options: &options,
        };

        // 2024-03-15 is a Friday
        let mut view = CalendarView::on_mount(
            CalendarDate::parse("2024-03-15").unwrap(),
            &options,
        );
        let page = view.render(&screen);
        let lines: Vec<&str> = page.lines().collect();

        assert!(lines[0].contains("March 2024"));
        assert!(lines[1].contains(&"  F".dimmed().to_string()));
        assert!(page.contains(&highlighted(" 15")));
        assert!(page.contains(&" 22".dimmed().to_string()));
        assert!(!page.contains(&highlighted(" 22")));

        view.on_month_change(MonthPage::new(4, 2024).unwrap());
        assert_eq!(
            view.on_day_press(CalendarDate::parse("2024-04-03").unwrap()),
            DayPress::Selected
        );
        let page = view.render(&screen);
        let lines: Vec<&str> = page.lines().collect();

        assert!(lines[0].contains("April 2024"));
        assert!(!lines[1].contains("\x1b[2m"));
        assert!(page.contains(&highlighted("  3")));
        assert!(!page.contains(&highlighted(" 15")));
    }

    #[test]
    fn test_header_name_falls_back_without_session() {
        let locale = LocaleConfig::default();
        let options = CalendarOptions::default();
        let screen = Screen {
            locale: &locale,
            options: &options,
        };

        let header = IdentityState::default().render(&screen);
        assert!(header.contains("No name given"));
        assert!(header.contains("default picture"));
    }
}
