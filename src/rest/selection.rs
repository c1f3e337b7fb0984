//! Lowest-rate selection.
//!
//! [`lowest_rate`] picks the cheapest quote from a list, optionally restricted
//! to a set of carriers and services. It is pure: no request is sent.
//!
//! Prices are compared as decimals, so `"10.00"` is more expensive than
//! `"9.50"` even though it sorts first as a string.

use rust_decimal::Decimal;

use crate::rest::{NoRatesReason, ResourceError};

/// A priced (carrier, service) quote.
///
/// Implemented by shipment rates and pickup rates so both can go through
/// [`lowest_rate`].
pub trait Quote {
    /// The carrier name, e.g. `"USPS"`.
    fn carrier(&self) -> &str;

    /// The service name, e.g. `"Priority"`.
    fn service(&self) -> &str;

    /// The raw price as quoted.
    fn raw_price(&self) -> &str;

    /// The price as a decimal, or `None` when the quote is not a number.
    fn price(&self) -> Option<Decimal> {
        self.raw_price().trim().parse::<Decimal>().ok()
    }
}

/// Returns the cheapest quote that matches the filters.
///
/// An empty `carriers` or `services` slice means "any". Matching is
/// case-insensitive. When several quotes share the minimum price, the first
/// one in list order wins. Quotes with an unparseable price are skipped.
///
/// # Errors
///
/// Returns [`ResourceError::NoRatesAvailable`] with
/// [`NoRatesReason::EmptyRateList`] when `rates` is empty, and
/// [`NoRatesReason::NoMatch`] when the filters leave nothing.
///
/// # Example
///
/// ```rust,ignore
/// let rate = lowest_rate(shipment.rates(), &["USPS"], &["Priority", "Express"])?;
/// let shipment = shipment.buy(&client, rate).await?;
/// ```
pub fn lowest_rate<'a, Q: Quote>(
    rates: &'a [Q],
    carriers: &[&str],
    services: &[&str],
) -> Result<&'a Q, ResourceError> {
    if rates.is_empty() {
        return Err(ResourceError::NoRatesAvailable {
            reason: NoRatesReason::EmptyRateList,
        });
    }

    let mut best: Option<(&Q, Decimal)> = None;

    for rate in rates {
        if !matches_any(carriers, rate.carrier()) || !matches_any(services, rate.service()) {
            continue;
        }

        let Some(price) = rate.price() else {
            tracing::warn!(
                carrier = rate.carrier(),
                service = rate.service(),
                price = rate.raw_price(),
                "skipping rate with unparseable price"
            );
            continue;
        };

        if best.map_or(true, |(_, lowest)| price < lowest) {
            best = Some((rate, price));
        }
    }

    best.map(|(rate, _)| rate)
        .ok_or_else(|| ResourceError::NoRatesAvailable {
            reason: NoRatesReason::NoMatch {
                carriers: carriers.iter().map(ToString::to_string).collect(),
                services: services.iter().map(ToString::to_string).collect(),
            },
        })
}

fn matches_any(filter: &[&str], value: &str) -> bool {
    filter.is_empty() || filter.iter().any(|f| f.eq_ignore_ascii_case(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestQuote {
        carrier: &'static str,
        service: &'static str,
        rate: &'static str,
    }

    impl Quote for TestQuote {
        fn carrier(&self) -> &str {
            self.carrier
        }
        fn service(&self) -> &str {
            self.service
        }
        fn raw_price(&self) -> &str {
            self.rate
        }
    }

    const fn quote(carrier: &'static str, service: &'static str, rate: &'static str) -> TestQuote {
        TestQuote {
            carrier,
            service,
            rate,
        }
    }

    fn sample() -> Vec<TestQuote> {
        vec![
            quote("USPS", "Priority", "10.00"),
            quote("USPS", "First", "9.50"),
            quote("UPS", "Ground", "12.25"),
            quote("FedEx", "FEDEX_GROUND", "8.75"),
        ]
    }

    #[test]
    fn test_lowest_rate_compares_as_decimals() {
        let rates = sample();
        let rate = lowest_rate(&rates, &[], &[]).unwrap();
        assert_eq!(rate.carrier, "FedEx");
        assert_eq!(rate.rate, "8.75");
    }

    #[test]
    fn test_lowest_rate_applies_carrier_filter() {
        let rates = sample();
        let rate = lowest_rate(&rates, &["USPS"], &[]).unwrap();
        assert_eq!(rate.service, "First");
    }

    #[test]
    fn test_lowest_rate_applies_both_filters() {
        let rates = sample();
        let rate = lowest_rate(&rates, &["usps", "ups"], &["priority", "ground"]).unwrap();
        assert_eq!(rate.service, "Priority");
    }

    #[test]
    fn test_lowest_rate_is_no_greater_than_any_filtered_rate() {
        let rates = sample();
        let rate = lowest_rate(&rates, &["USPS", "UPS"], &[]).unwrap();
        let chosen = rate.price().unwrap();

        for other in rates.iter().filter(|r| r.carrier != "FedEx") {
            assert!(chosen <= other.price().unwrap());
        }
    }

    #[test]
    fn test_lowest_rate_ties_keep_first_in_list_order() {
        let rates = vec![
            quote("UPS", "Ground", "7.00"),
            quote("USPS", "Priority", "7.0"),
            quote("FedEx", "Home", "7.000"),
        ];
        let rate = lowest_rate(&rates, &[], &[]).unwrap();
        assert_eq!(rate.carrier, "UPS");
    }

    #[test]
    fn test_lowest_rate_skips_unparseable_prices() {
        let rates = vec![quote("USPS", "Priority", "n/a"), quote("USPS", "First", "11.10")];
        let rate = lowest_rate(&rates, &[], &[]).unwrap();
        assert_eq!(rate.service, "First");
    }

    #[test]
    fn test_lowest_rate_empty_list_is_distinguishable() {
        let rates: Vec<TestQuote> = Vec::new();
        let result = lowest_rate(&rates, &["USPS"], &[]);
        assert!(matches!(
            result,
            Err(ResourceError::NoRatesAvailable {
                reason: NoRatesReason::EmptyRateList
            })
        ));
    }

    #[test]
    fn test_lowest_rate_no_match_reports_filters() {
        let rates = sample();
        let result = lowest_rate(&rates, &["DHL"], &["Express"]);
        match result {
            Err(ResourceError::NoRatesAvailable {
                reason: NoRatesReason::NoMatch { carriers, services },
            }) => {
                assert_eq!(carriers, vec!["DHL".to_string()]);
                assert_eq!(services, vec!["Express".to_string()]);
            }
            other => panic!("Expected NoMatch, got {other:?}"),
        }
    }
}
