//! Timeline command
//!
//! Implements `sgrid timeline`: opens a timeline window at the chosen zoom,
//! optionally grows it left or right in extension chunks, and renders every
//! work order that intersects it.

use super::{parse_date, parse_granularity};
use crate::output::{self, timeline::DEFAULT_TRACK_WIDTH};
use chrono::NaiveDate;
use clap::Args;
use schedgrid_db::{Database, DbError, WorkOrderFilter};
use schedgrid_timeline::{Clock, FixedClock, Granularity, SystemClock, TimelineWindow};
use tracing::debug;

/// Show the schedule on a timeline
#[derive(Debug, Args)]
pub struct TimelineCommand {
    /// Zoom level (day, week, month)
    #[arg(short, long, value_parser = parse_granularity, default_value = "day")]
    pub zoom: Granularity,

    /// First visible date; requires --to (defaults to a range around today)
    #[arg(long, value_parser = parse_date, requires = "to")]
    pub from: Option<NaiveDate>,

    /// Last visible date; requires --from
    #[arg(long, value_parser = parse_date, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Grow the range into the past this many times
    #[arg(long, default_value_t = 0)]
    pub extend_left: u32,

    /// Grow the range into the future this many times
    #[arg(long, default_value_t = 0)]
    pub extend_right: u32,

    /// Only show this work center
    #[arg(short, long)]
    pub center: Option<String>,

    /// Width of the timeline track in characters
    #[arg(short, long, default_value_t = DEFAULT_TRACK_WIDTH)]
    pub width: usize,

    /// Pretend today is this date
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

impl TimelineCommand {
    /// Execute the timeline command and return the rendered grid.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if:
    /// - The range is inverted or cannot be laid out
    /// - The work center filter names an unknown center
    /// - Database operations fail
    pub async fn execute(&self, db: &Database) -> Result<String, DbError> {
        let window = self.build_window()?;
        let range = window.range();

        let centers = match &self.center {
            Some(id) => {
                let center = db.work_centers().get(id).await?.ok_or_else(|| {
                    DbError::NotFound {
                        entity: "Work center",
                        id: id.clone(),
                    }
                })?;
                vec![center]
            }
            None => db.work_centers().list().await?,
        };

        // The last column covers its whole period, not just its anchor day
        let last_visible_day = Granularity::Day.step(window.period_end()?, -1)?;
        let mut filter = WorkOrderFilter::new().within(range.start(), last_visible_day);
        if let Some(id) = &self.center {
            filter = filter.with_work_center(id);
        }
        let orders = db.work_orders().list(&filter).await?;
        debug!(
            "Rendering {} orders across {} centers for {:?}",
            orders.len(),
            centers.len(),
            range
        );

        Ok(output::render_timeline(&window, &centers, &orders, self.width)?)
    }

    fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }

    /// Open the window and apply the requested extensions.
    fn build_window(&self) -> Result<TimelineWindow, DbError> {
        let mut window = match (self.from, self.to) {
            (Some(from), Some(to)) => TimelineWindow::with_range(self.zoom, from, to, self.clock())?,
            (None, None) => TimelineWindow::new(self.zoom, self.clock())?,
            _ => return Err(DbError::validation("--from and --to must be given together")),
        };

        for _ in 0..self.extend_left {
            window.extend_left()?;
        }
        for _ in 0..self.extend_right {
            window.extend_right()?;
        }

        Ok(window)
    }
}
