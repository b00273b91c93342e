use anyhow::Result;
use owo_colors::OwoColorize;
use tracing::debug;
use steme_core::calendar::{CalendarView, DayPress};
use steme_core::config::StemeConfig;
use steme_core::date::{CalendarDate, MonthPage, today_local};

use crate::render::{Render, Screen};

pub struct CalendarArgs {
    pub today: Option<String>,
    pub month: Option<String>,
    pub select: Option<String>,
    pub json: bool,
}

pub fn run(config: &StemeConfig, args: CalendarArgs) -> Result<()> {
    let today = match args.today.as_deref() {
        Some(s) => CalendarDate::parse(s)?,
        None => today_local(),
    };

    debug!(today = %today, "mounting calendar");
    let mut view = CalendarView::on_mount(today, config.calendar());

    if let Some(month) = args.month.as_deref() {
        view.on_month_change(MonthPage::parse(month)?);
    }

    let mut ignored = None;
    if let Some(select) = args.select.as_deref() {
        let date = CalendarDate::parse(select)?;
        match view.on_day_press(date) {
            // The list pages over to a day pressed outside the visible month
            DayPress::Selected if !view.visible_month().contains(&date) => {
                view.on_month_change(date.month_page());
            }
            DayPress::Selected => {}
            DayPress::Ignored => ignored = Some(date),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view.render_inputs())?);
        return Ok(());
    }

    let screen = Screen {
        locale: config.locale(),
        options: config.calendar(),
    };
    println!("{}", view.render(&screen));
    view.on_month_did_render();

    println!();
    println!("Selected: {}", view.selected().to_string().bold());
    if let Some(date) = ignored {
        println!("{}", format!("{date} is disabled, selection unchanged").yellow());
    }

    Ok(())
}
