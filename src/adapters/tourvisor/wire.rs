//! Tourvisor XML payloads and their defensive decoding.
//!
//! Every numeric field arrives as element text and the API is known to emit
//! empty elements, so all leaf fields deserialize as optional strings and
//! are parsed leniently afterwards. A malformed number degrades to a zero
//! count or an absent price, never to a decode failure for the whole
//! response.

use serde::Deserialize;

use crate::domain::foundation::RequestId;
use crate::domain::search::{HotelOffer, JobState, JobStatus, SearchResults};
use crate::ports::ProviderError;

/// Body of `search.php`: either a request id or an error message.
#[derive(Debug, Deserialize)]
struct SubmitBody {
    requestid: Option<String>,
    errormessage: Option<String>,
}

/// Body of `result.php?type=status`.
#[derive(Debug, Deserialize)]
struct StatusBody {
    status: Option<StatusBlock>,
    errormessage: Option<String>,
}

/// Body of `result.php?type=result`.
#[derive(Debug, Deserialize)]
struct ResultBody {
    status: Option<StatusBlock>,
    result: Option<HotelList>,
    errormessage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusBlock {
    state: Option<String>,
    hotelsfound: Option<String>,
    toursfound: Option<String>,
    minprice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HotelList {
    #[serde(default)]
    hotel: Vec<HotelRecord>,
}

#[derive(Debug, Deserialize)]
struct HotelRecord {
    hotelname: Option<String>,
    hotelstars: Option<String>,
    price: Option<String>,
    countryname: Option<String>,
    regionname: Option<String>,
    hotelrating: Option<String>,
    hoteldescription: Option<String>,
}

impl StatusBlock {
    fn into_status(self) -> JobStatus {
        let state = JobState::from_wire(self.state.as_deref().unwrap_or(""));
        let mut status = JobStatus::new(
            state,
            parse_u64(self.hotelsfound.as_deref()).unwrap_or(0) as u32,
            parse_u64(self.toursfound.as_deref()).unwrap_or(0) as u32,
        );
        if let Some(min_price) = parse_u64(self.minprice.as_deref()).filter(|p| *p > 0) {
            status = status.with_min_price(min_price);
        }
        status
    }
}

impl HotelRecord {
    fn into_offer(self) -> HotelOffer {
        HotelOffer {
            name: self.hotelname.unwrap_or_default(),
            stars: parse_u64(self.hotelstars.as_deref()).unwrap_or(0).min(5) as u8,
            price: parse_u64(self.price.as_deref()).filter(|p| *p > 0),
            country: self.countryname.unwrap_or_default(),
            region: self.regionname.unwrap_or_default(),
            rating: parse_f64(self.hotelrating.as_deref()).unwrap_or(0.0),
            description: self.hoteldescription.filter(|d| !d.trim().is_empty()),
        }
    }
}

/// Decodes a submission response into a request id.
pub(super) fn decode_submit(body: &str) -> Result<RequestId, ProviderError> {
    let parsed: SubmitBody =
        quick_xml::de::from_str(body).map_err(|e| ProviderError::parse(e.to_string()))?;

    if let Some(message) = parsed.errormessage.filter(|m| !m.trim().is_empty()) {
        return Err(ProviderError::rejected(message));
    }
    match parsed.requestid.filter(|id| !id.trim().is_empty()) {
        Some(id) => Ok(RequestId::new(id.trim())),
        None => Err(ProviderError::parse("response carries no requestid")),
    }
}

/// Decodes a status response into job counters.
pub(super) fn decode_status(body: &str) -> Result<JobStatus, ProviderError> {
    let parsed: StatusBody =
        quick_xml::de::from_str(body).map_err(|e| ProviderError::parse(e.to_string()))?;

    if let Some(message) = parsed.errormessage.filter(|m| !m.trim().is_empty()) {
        return Err(ProviderError::rejected(message));
    }
    match parsed.status {
        Some(block) => Ok(block.into_status()),
        None => Err(ProviderError::parse("response carries no status block")),
    }
}

/// Decodes a result response into the collected hotel records.
pub(super) fn decode_results(body: &str) -> Result<SearchResults, ProviderError> {
    let parsed: ResultBody =
        quick_xml::de::from_str(body).map_err(|e| ProviderError::parse(e.to_string()))?;

    if let Some(message) = parsed.errormessage.filter(|m| !m.trim().is_empty()) {
        return Err(ProviderError::rejected(message));
    }

    let status = parsed
        .status
        .unwrap_or_default()
        .into_status();
    let hotels = parsed
        .result
        .unwrap_or_default()
        .hotel
        .into_iter()
        .map(HotelRecord::into_offer)
        .collect();

    Ok(SearchResults { status, hotels })
}

fn parse_u64(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_f64(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_submit_request_id() {
        let body = "<result><requestid>3929206</requestid></result>";

        let id = decode_submit(body).unwrap();

        assert_eq!(id.as_str(), "3929206");
    }

    #[test]
    fn test_decode_submit_error_message_rejects() {
        let body = "<result><errormessage>Неверный формат даты</errormessage></result>";

        let err = decode_submit(body).unwrap_err();

        assert!(matches!(err, ProviderError::Rejected(m) if m == "Неверный формат даты"));
    }

    #[test]
    fn test_decode_submit_garbage_is_parse_error() {
        assert!(matches!(
            decode_submit("<result></result>"),
            Err(ProviderError::Parse(_))
        ));
        assert!(matches!(
            decode_submit("not xml at all"),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn test_decode_status_counters() {
        let body = "<data><status>\
            <state>searching</state>\
            <hotelsfound>12</hotelsfound>\
            <toursfound>45</toursfound>\
            <minprice>38500</minprice>\
            </status></data>";

        let status = decode_status(body).unwrap();

        assert_eq!(status.state, JobState::Pending);
        assert_eq!(status.hotels_found, 12);
        assert_eq!(status.tours_found, 45);
        assert_eq!(status.min_price, Some(38_500));
    }

    #[test]
    fn test_decode_status_empty_fields_degrade_to_zero() {
        let body = "<data><status>\
            <state>finished</state>\
            <hotelsfound></hotelsfound>\
            <toursfound>oops</toursfound>\
            <minprice/>\
            </status></data>";

        let status = decode_status(body).unwrap();

        assert_eq!(status.state, JobState::Finished);
        assert_eq!(status.hotels_found, 0);
        assert_eq!(status.tours_found, 0);
        assert_eq!(status.min_price, None);
    }

    #[test]
    fn test_decode_results_hotels() {
        let body = "<data>\
            <status><state>finished</state>\
            <hotelsfound>2</hotelsfound><toursfound>6</toursfound>\
            <minprice>45000</minprice></status>\
            <result>\
            <hotel>\
            <hotelname>Sea Breeze</hotelname>\
            <hotelstars>4</hotelstars>\
            <price>52000</price>\
            <countryname>Турция</countryname>\
            <regionname>Анталья</regionname>\
            <hotelrating>4.6</hotelrating>\
            <hoteldescription>Отель у моря</hoteldescription>\
            </hotel>\
            <hotel>\
            <hotelname>Budget Inn</hotelname>\
            <hotelstars>3</hotelstars>\
            <price></price>\
            <countryname>Турция</countryname>\
            <regionname>Кемер</regionname>\
            <hotelrating>0</hotelrating>\
            <hoteldescription/>\
            </hotel>\
            </result></data>";

        let results = decode_results(body).unwrap();

        assert_eq!(results.status.state, JobState::Finished);
        assert_eq!(results.hotels.len(), 2);
        let first = &results.hotels[0];
        assert_eq!(first.name, "Sea Breeze");
        assert_eq!(first.stars, 4);
        assert_eq!(first.price, Some(52_000));
        assert_eq!(first.rating, 4.6);
        assert_eq!(first.description.as_deref(), Some("Отель у моря"));
        let second = &results.hotels[1];
        assert_eq!(second.price, None);
        assert_eq!(second.description, None);
    }

    #[test]
    fn test_decode_results_without_hotels() {
        let body = "<data><status><state>finished</state>\
            <hotelsfound>0</hotelsfound><toursfound>0</toursfound>\
            </status></data>";

        let results = decode_results(body).unwrap();

        assert!(results.hotels.is_empty());
    }

    #[test]
    fn test_decode_results_error_message_rejects() {
        let body = "<data><errormessage>нет доступа</errormessage></data>";

        assert!(matches!(
            decode_results(body),
            Err(ProviderError::Rejected(_))
        ));
    }

    #[test]
    fn test_absurd_star_count_clamped() {
        let record = HotelRecord {
            hotelname: Some("X".into()),
            hotelstars: Some("400".into()),
            price: None,
            countryname: None,
            regionname: None,
            hotelrating: None,
            hoteldescription: None,
        };

        assert_eq!(record.into_offer().stars, 5);
    }
}
