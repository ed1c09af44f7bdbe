use crate::model::{DealRecord, ParseError, RawDeal};
use tracing::warn;

/// Stable identifier for a company: spaces and apostrophes removed,
/// anything from the first `.` dropped, lowercased.
pub fn canonical_key(company_name: &str) -> String {
    let compact: String = company_name
        .chars()
        .filter(|c| *c != ' ' && *c != '\'')
        .collect();
    let head = compact.split('.').next().unwrap_or("");
    head.trim().to_lowercase()
}

/// Parses an offer such as `" 20 %"` into its whole-number percentage.
pub fn parse_offer(text: &str) -> Result<u8, ParseError> {
    let digits = text.replace('%', "");
    let digits = digits.trim();
    let value: u64 = digits
        .parse()
        .map_err(|_| ParseError::InvalidOffer(text.to_string()))?;
    if value > 100 {
        return Err(ParseError::OfferOutOfRange(value));
    }
    Ok(value as u8)
}

pub fn normalize_deal(raw: &RawDeal) -> Result<DealRecord, ParseError> {
    let company_name = raw.company_name.trim().to_string();
    if company_name.is_empty() {
        return Err(ParseError::EmptyCompany);
    }
    let offer_percent = parse_offer(&raw.offer_text)?;

    Ok(DealRecord {
        canonical_key: canonical_key(&company_name),
        company_name,
        offer_percent,
        expire_date: raw.expire_date.trim().to_string(),
    })
}

/// Normalizes every tuple, skipping (and logging) the ones that fail.
pub fn normalize_all(raw: &[RawDeal]) -> Vec<DealRecord> {
    raw.iter()
        .filter_map(|deal| match normalize_deal(deal) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping deal for '{}': {}", deal.company_name.trim(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(company: &str, date: &str, offer: &str) -> RawDeal {
        RawDeal {
            company_name: company.into(),
            expire_date: date.into(),
            offer_text: offer.into(),
        }
    }

    #[test]
    fn canonical_key_strips_spaces_quotes_and_domain() {
        assert_eq!(canonical_key("Nike"), "nike");
        assert_eq!(canonical_key("Macy's"), "macys");
        assert_eq!(canonical_key("Best Buy"), "bestbuy");
        assert_eq!(canonical_key("Amazon.com"), "amazon");
        assert_eq!(canonical_key("Shop.Example.co.uk"), "shop");
        assert_eq!(canonical_key(".com"), "");
        assert_eq!(canonical_key(""), "");
    }

    #[test]
    fn canonical_key_is_stable_on_its_own_output() {
        for name in ["Nike", "Dick's Sporting Goods", "Walmart.com", "H&M"] {
            let once = canonical_key(name);
            assert_eq!(canonical_key(name), once);
            assert_eq!(canonical_key(&once), once);
        }
    }

    #[test]
    fn normalizes_the_nike_example() {
        let record = normalize_deal(&raw("Nike", "05/01/25", "20%")).unwrap();
        assert_eq!(
            record,
            DealRecord {
                company_name: "Nike".into(),
                offer_percent: 20,
                expire_date: "05/01/25".into(),
                canonical_key: "nike".into(),
            }
        );
    }

    #[test]
    fn trims_name_date_and_offer() {
        let record = normalize_deal(&raw("  Best Buy ", " 12/31/24 ", " 15 % ")).unwrap();
        assert_eq!(record.company_name, "Best Buy");
        assert_eq!(record.expire_date, "12/31/24");
        assert_eq!(record.offer_percent, 15);
        assert_eq!(record.canonical_key, "bestbuy");
    }

    #[test]
    fn rejects_non_numeric_and_out_of_range_offers() {
        assert_eq!(
            parse_offer("2O%"),
            Err(ParseError::InvalidOffer("2O%".into()))
        );
        assert_eq!(parse_offer("150%"), Err(ParseError::OfferOutOfRange(150)));
        assert_eq!(parse_offer("0%"), Ok(0));
        assert_eq!(parse_offer("100"), Ok(100));
    }

    #[test]
    fn blank_company_is_rejected() {
        assert_eq!(
            normalize_deal(&raw("   ", "05/01/25", "20%")),
            Err(ParseError::EmptyCompany)
        );
    }

    #[test]
    fn whitespace_only_company_never_reaches_the_store() {
        use crate::parser::{DealParser, Parser};
        use crate::storage::CsvStorage;

        let deals = DealParser::new().parse(
            "Add this   deal which expires on 05/01/25 for 20% off\n\
             Add this Nike deal which expires on 05/01/25 for 20% off",
        );
        assert_eq!(deals.len(), 2);

        let records = normalize_all(&deals);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].canonical_key, "nike");

        let dir = tempfile::tempdir().unwrap();
        let store = CsvStorage::new(dir.path().join("deals_data.csv"));
        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap().into_records(), records);
    }

    #[test]
    fn one_bad_offer_does_not_sink_the_batch() {
        let batch = vec![
            raw("Nike", "05/01/25", "20%"),
            raw("Broken", "05/01/25", "abc%"),
            raw("Adidas", "06/15/25", "35%"),
        ];
        let records = normalize_all(&batch);
        let names: Vec<_> = records.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(names, ["Nike", "Adidas"]);
    }
}
