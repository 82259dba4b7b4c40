use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Mileage assigned when the feed value cannot be read. Sits above every
/// sensible ceiling so unreadable listings are excluded, not guessed at.
pub const MILEAGE_SENTINEL: i64 = 999_999;

const DETAIL_PAGE_URL: &str =
    "https://www.autotrader.com/cars-for-sale/vehicledetails.xhtml?listingId=";

// listing
//  ├── id
//  ├── vin
//  ├── year
//  ├── make.name / model.name / engine.name
//  ├── specifications.mileage.value   "45,231"
//  ├── pricingDetail.salePrice
//  ├── displacementUOM                liters
//  ├── transmission.description
//  ├── description.label
//  ├── color.exteriorColorSimple
//  └── images.sources[].src

/// Upstream listing record. Every field is optional and a value of the wrong
/// shape reads as absent; defaults are applied by [`ListingFields::extract`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<ListingId>,
    #[serde(default, deserialize_with = "lenient")]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<ModelYear>,
    #[serde(default, deserialize_with = "lenient")]
    pub make: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub specifications: Option<Specifications>,
    #[serde(default, deserialize_with = "lenient")]
    pub pricing_detail: Option<PricingDetail>,
    #[serde(rename = "displacementUOM", default, deserialize_with = "lenient")]
    pub displacement_uom: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub engine: Option<NamedRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub transmission: Option<TransmissionInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<DescriptionInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<ColorInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Option<ImageGallery>,
}

/// Reads a field through `serde_json::Value` and falls back to the default
/// when the value is `null` or has an unexpected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Text(String),
    Number(Number),
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingId::Text(value) => f.write_str(value),
            ListingId::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Model year as published; some feeds quote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelYear {
    Number(Number),
    Text(String),
}

impl Default for ModelYear {
    fn default() -> Self {
        ModelYear::Number(Number::from(0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NamedRef {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Specifications {
    #[serde(default, deserialize_with = "lenient")]
    pub mileage: Option<MileageSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MileageSpec {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<MileageValue>,
}

/// Odometer reading as published. Feeds normally send comma-grouped text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MileageValue {
    Text(String),
    Number(Number),
}

impl MileageValue {
    fn miles(&self) -> i64 {
        match self {
            MileageValue::Text(text) => parse_mileage(text),
            MileageValue::Number(number) => number.as_i64().unwrap_or(MILEAGE_SENTINEL),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub sale_price: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransmissionInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DescriptionInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub exterior_color_simple: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageGallery {
    #[serde(default, deserialize_with = "lenient")]
    pub sources: Vec<ImageSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageSource {
    #[serde(default, deserialize_with = "lenient")]
    pub src: Option<String>,
}

/// Flattened view of a listing with defaults applied and the free-text
/// matching fields lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    pub vin: String,
    pub year: ModelYear,
    pub make: String,
    pub model: String,
    pub mileage: i64,
    pub price: Number,
    pub engine_liters: Number,
    pub engine_name: String,
    pub transmission: String,
    pub description: String,
    pub color: String,
    pub image: String,
    pub link: String,
}

impl ListingFields {
    pub fn extract(listing: &RawListing) -> Self {
        let name_or = |named: &Option<NamedRef>, default: &str| {
            named
                .as_ref()
                .and_then(|named| named.name.clone())
                .unwrap_or_else(|| default.to_string())
        };

        let mileage = listing
            .specifications
            .as_ref()
            .and_then(|specs| specs.mileage.as_ref())
            .and_then(|mileage| mileage.value.as_ref())
            .map(MileageValue::miles)
            .unwrap_or(MILEAGE_SENTINEL);

        let price = listing
            .pricing_detail
            .as_ref()
            .and_then(|pricing| pricing.sale_price.clone())
            .unwrap_or_else(|| Number::from(0));

        let transmission = listing
            .transmission
            .as_ref()
            .and_then(|transmission| transmission.description.as_deref())
            .unwrap_or_default()
            .to_lowercase();

        let description = listing
            .description
            .as_ref()
            .and_then(|description| description.label.as_deref())
            .unwrap_or_default()
            .to_lowercase();

        let image = listing
            .images
            .as_ref()
            .and_then(|gallery| gallery.sources.first())
            .and_then(|source| source.src.clone())
            .unwrap_or_default();

        Self {
            vin: listing.vin.clone().unwrap_or_else(|| "Unknown".to_string()),
            year: listing.year.clone().unwrap_or_default(),
            make: name_or(&listing.make, "Unknown"),
            model: name_or(&listing.model, "Unknown"),
            mileage,
            price,
            engine_liters: listing
                .displacement_uom
                .clone()
                .unwrap_or_else(default_displacement),
            engine_name: name_or(&listing.engine, "").to_lowercase(),
            transmission,
            description,
            color: listing
                .color
                .as_ref()
                .and_then(|color| color.exterior_color_simple.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            image,
            link: detail_link(listing.id.as_ref()),
        }
    }

    pub fn price_value(&self) -> f64 {
        self.price.as_f64().unwrap_or(0.0)
    }

    pub fn liters(&self) -> f64 {
        self.engine_liters.as_f64().unwrap_or(0.0)
    }

    /// Eighth VIN character, which encodes the engine family. Only read from
    /// well-formed 17 character VINs.
    pub fn vin_engine_code(&self) -> Option<char> {
        if self.vin.chars().count() == 17 {
            self.vin.chars().nth(7)
        } else {
            None
        }
    }

    pub fn into_evaluated(self, score: i32, notes: String) -> EvaluatedListing {
        EvaluatedListing {
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            engine_liters: self.engine_liters,
            transmission: title_case(&self.transmission),
            color: self.color,
            vin: self.vin,
            image: self.image,
            score,
            notes,
            link: self.link,
        }
    }
}

/// Accepted listing as exported. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedListing {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Year")]
    pub year: ModelYear,
    #[serde(rename = "Price")]
    pub price: Number,
    #[serde(rename = "Mileage")]
    pub mileage: i64,
    #[serde(rename = "Engine_Liters")]
    pub engine_liters: Number,
    #[serde(rename = "Transmission")]
    pub transmission: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "VIN")]
    pub vin: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Score")]
    pub score: i32,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Link")]
    pub link: String,
}

impl EvaluatedListing {
    pub fn price_value(&self) -> f64 {
        self.price.as_f64().unwrap_or(0.0)
    }
}

fn default_displacement() -> Number {
    Number::from_f64(0.0).unwrap_or_else(|| Number::from(0))
}

/// Strips thousands separators and parses the remaining digits. Anything
/// unreadable becomes [`MILEAGE_SENTINEL`].
pub fn parse_mileage(raw: &str) -> i64 {
    raw.replace(',', "")
        .trim()
        .parse::<i64>()
        .unwrap_or(MILEAGE_SENTINEL)
}

/// Upper-cases each cased character that follows an uncased one and
/// lower-cases the rest, so "6-speed automatic" becomes "6-Speed Automatic".
pub fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut previous_cased = false;

    for ch in value.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased && previous_cased {
            titled.extend(ch.to_lowercase());
        } else if cased {
            titled.extend(ch.to_uppercase());
        } else {
            titled.push(ch);
        }
        previous_cased = cased;
    }

    titled
}

pub fn detail_link(id: Option<&ListingId>) -> String {
    match id {
        Some(id) => format!("{DETAIL_PAGE_URL}{id}"),
        None => DETAIL_PAGE_URL.to_string(),
    }
}
