// Deal-sentence parsing over extracted page text
use crate::model::RawDeal;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static DEAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Add this (.+?) deal which expires on (\d{2}/\d{2}/\d{2}).*?(\d+%)")
        .expect("deal pattern is valid")
});

pub trait Parser {
    fn parse(&self, text: &str) -> Vec<RawDeal>;
}

pub struct DealParser;

impl DealParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DealParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for DealParser {
    /// Every non-overlapping match in `text`, in order of appearance.
    fn parse(&self, text: &str) -> Vec<RawDeal> {
        DEAL_PATTERN
            .captures_iter(text)
            .map(|caps| {
                let deal = RawDeal {
                    company_name: caps[1].trim().to_string(),
                    expire_date: caps[2].trim().to_string(),
                    offer_text: caps[3].trim().to_string(),
                };
                debug!(
                    "Parsed: {}, {}, {}",
                    deal.company_name, deal.offer_text, deal.expire_date
                );
                deal
            })
            .collect()
    }
}
