//! Race extraction from the scheduled-race page.
//!
//! ### Page layout
//! - One container (`#daily_lmu_race_list`) holds every race card.
//! - Each card (`div.scheduled-race-card`) has a tier badge, an `h4` name,
//!   two `.race_header` regions (duration, then track) and a ticker of start times.
//!
//! ### Leniency
//! - A missing container fails the whole page.
//! - Cards without a name are dropped.
//! - Unreadable durations become 0 and unreadable start times are skipped.

pub mod duration;
pub mod timestamp;

pub use duration::parse_duration_minutes;
pub use timestamp::parse_timestamp;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use lmu_races_core::{Error, RaceDescriptor, RaceSchedule, RaceSlot};

use crate::document::{Document, HtmlDocument, Node};

pub const CONTAINER_SELECTOR: &str = "#daily_lmu_race_list";
pub const CARD_SELECTOR: &str = "div.scheduled-race-card";
const BADGE_SELECTOR: &str = ".tier-badge";
const NAME_SELECTOR: &str = "h4";
const HEADER_SELECTOR: &str = ".race_header";
const HEADER_VALUE_SELECTOR: &str = "span";
const TIME_SELECTOR: &str = ".marquee-content span";

/// Both projections produced from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// One entry per (card, start time), in page order.
    pub slots: Vec<RaceSlot>,
    /// One entry per named card, in page order.
    pub schedules: Vec<RaceSchedule>,
}

/// Turns a race page into [`Extraction`]s.
#[derive(Debug, Clone, Copy)]
pub struct RaceExtractor {
    tz: Tz,
}

impl RaceExtractor {
    /// `tz` is the timezone the page writes its start times in.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse raw page bytes and extract races.
    ///
    /// The parsed tree never outlives this call.
    pub fn extract_page(&self, body: &[u8], now: DateTime<Utc>) -> Result<Extraction, Error> {
        self.extract(&HtmlDocument::parse(body), now)
    }

    /// Extract races from an already parsed document.
    ///
    /// `now` anchors the year of the year-less start times.
    ///
    /// # Errors
    ///
    /// Returns `Error::ContainerNotFound` when the race list container is absent.
    pub fn extract<D: Document>(&self, document: &D, now: DateTime<Utc>) -> Result<Extraction, Error> {
        let container = document
            .find_all(CONTAINER_SELECTOR)
            .into_iter()
            .next()
            .ok_or_else(|| Error::ContainerNotFound(CONTAINER_SELECTOR.to_string()))?;

        let mut extraction = Extraction::default();
        let mut skipped = 0usize;

        for card in container.find_all(CARD_SELECTOR) {
            match self.extract_card(&card, now) {
                Some(schedule) => {
                    extraction.slots.extend(schedule.expand());
                    extraction.schedules.push(schedule);
                }
                None => skipped += 1,
            }
        }

        tracing::info!(
            schedules = extraction.schedules.len(),
            slots = extraction.slots.len(),
            skipped,
            "extracted races"
        );

        Ok(extraction)
    }

    fn extract_card<N: Node>(&self, card: &N, now: DateTime<Utc>) -> Option<RaceSchedule> {
        let name = first_text(card, NAME_SELECTOR);
        if name.is_empty() {
            tracing::debug!("skipping race card without a name");
            return None;
        }

        let level = card
            .find_all(BADGE_SELECTOR)
            .first()
            .map(|badge| badge.own_text().trim().to_string())
            .unwrap_or_default();

        let headers = card.find_all(HEADER_SELECTOR);
        let duration = headers.first().map(last_value).unwrap_or_default();
        let track = headers.get(1).map(last_value).unwrap_or_default();

        let slots = card
            .find_all(TIME_SELECTOR)
            .iter()
            .filter_map(|fragment| parse_timestamp(&fragment.text(), self.tz, now))
            .collect::<Vec<_>>();

        let race = RaceDescriptor { name, level, duration_minutes: parse_duration_minutes(&duration), track };

        tracing::debug!(
            name = %race.name,
            level = %race.level,
            duration_minutes = race.duration_minutes,
            track = %race.track,
            slots = slots.len(),
            "race card"
        );

        Some(RaceSchedule { race, slots })
    }
}

fn first_text<N: Node>(node: &N, selector: &str) -> String {
    node.find_all(selector)
        .first()
        .map(|found| found.text().trim().to_string())
        .unwrap_or_default()
}

/// Text of the last value span inside a header region.
fn last_value<N: Node>(header: &N) -> String {
    header
        .find_all(HEADER_VALUE_SELECTOR)
        .last()
        .map(|span| span.text().trim().to_string())
        .unwrap_or_default()
}
