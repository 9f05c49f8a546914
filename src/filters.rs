// Filter state for the listing pages, kept in sync with the URL query string.
//
// Two filter schemas (hotels, tours) live side by side; a single mode flag picks
// which one is read from and written to the URL. The URL is only rewritten on an
// explicit search, so everything here is a plain value transformation.

use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;
use url::form_urlencoded;

pub const DEFAULT_ADULTS: u32 = 2;
pub const DEFAULT_ROOMS: u32 = 1;
pub const HOTEL_PRICE_MAX: u32 = 1000;
pub const TOUR_PRICE_MAX: u32 = 500;
pub const MAX_RATING: u8 = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Filter update for {patch} rejected while {active} mode is active")]
    ModeMismatch { active: Mode, patch: Mode },

    #[error("Invalid price range: minimum {min} exceeds maximum {max}")]
    InvertedPriceRange { min: u32, max: u32 },

    #[error("Invalid date range: {start} is after {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid filter tag {0:?}: tags must be non-empty and free of commas")]
    InvalidTag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Hotels,
    Tours,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Hotels => "hotels",
            Mode::Tours => "tours",
        }
    }

    // Anything other than "tours" lands on the hotel listing
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("tours") => Mode::Tours,
            Some("hotels") | None => Mode::Hotels,
            Some(other) => {
                warn!(mode = other, "unknown filter mode, using hotels");
                Mode::Hotels
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Recommended,
    PriceLowToHigh,
    PriceHighToLow,
    Rating,
    Popularity,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Recommended => "recommended",
            SortOrder::PriceLowToHigh => "price-low",
            SortOrder::PriceHighToLow => "price-high",
            SortOrder::Rating => "rating",
            SortOrder::Popularity => "popularity",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "recommended" => Some(SortOrder::Recommended),
            "price-low" => Some(SortOrder::PriceLowToHigh),
            "price-high" => Some(SortOrder::PriceHighToLow),
            "rating" => Some(SortOrder::Rating),
            "popularity" => Some(SortOrder::Popularity),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type TagSet = BTreeSet<String>;

/// Ordered `key=value` pairs of a URL query string.
///
/// Lookups return the first occurrence of a key, matching how browsers resolve
/// `URLSearchParams::get`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a form-urlencoded query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Extend<(String, String)> for QueryParams {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish();
        f.write_str(&encoded)
    }
}

// Reads typed values out of the query string. Malformed values fall back to the
// field default and are logged, never surfaced to the caller.
struct ParamReader<'a> {
    params: &'a QueryParams,
}

impl<'a> ParamReader<'a> {
    fn raw(&self, key: &str) -> Option<&'a str> {
        self.params
            .get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn text(&self, key: &str) -> String {
        self.raw(key).map(str::to_string).unwrap_or_default()
    }

    fn number(&self, key: &str, default: u32) -> u32 {
        match self.raw(key) {
            None => default,
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!(key, value, default, "malformed numeric filter, using default");
                default
            }),
        }
    }

    fn rating(&self, key: &str) -> u8 {
        match self.raw(key).map(str::parse::<u8>) {
            None => 0,
            Some(Ok(rating)) => rating.min(MAX_RATING),
            Some(Err(_)) => {
                warn!(key, "malformed rating filter, ignoring");
                0
            }
        }
    }

    fn date(&self, key: &str) -> Option<NaiveDate> {
        let value = self.raw(key)?;
        match NaiveDate::parse_from_str(value, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                warn!(key, value, error = %e, "malformed date filter, ignoring");
                None
            }
        }
    }

    fn tags(&self, key: &str) -> TagSet {
        self.raw(key)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    // Keeps the order the ages were entered in; unparsable entries are skipped
    fn ages(&self, key: &str) -> Vec<u32> {
        let Some(value) = self.raw(key) else {
            return Vec::new();
        };
        value
            .split(',')
            .map(str::trim)
            .filter(|age| !age.is_empty())
            .filter_map(|age| match age.parse() {
                Ok(age) => Some(age),
                Err(_) => {
                    warn!(key, age, "malformed child age, skipping");
                    None
                }
            })
            .collect()
    }

    fn flag(&self, key: &str) -> bool {
        self.raw(key) == Some("true")
    }

    fn sort(&self, key: &str) -> SortOrder {
        match self.raw(key) {
            None => SortOrder::default(),
            Some(value) => SortOrder::parse(value).unwrap_or_else(|| {
                warn!(key, value, "unknown sort order, using recommended");
                SortOrder::default()
            }),
        }
    }
}

// Appends only the values that differ from their defaults
struct ParamWriter {
    params: QueryParams,
}

impl ParamWriter {
    fn new() -> Self {
        Self {
            params: QueryParams::new(),
        }
    }

    fn text(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.params.push(key, value);
        }
    }

    fn number(&mut self, key: &str, value: u32, default: u32) {
        if value != default {
            self.params.push(key, value.to_string());
        }
    }

    fn date(&mut self, key: &str, value: Option<NaiveDate>) {
        if let Some(date) = value {
            self.params.push(key, date.format(DATE_FORMAT).to_string());
        }
    }

    fn tags(&mut self, key: &str, tags: &TagSet) {
        if !tags.is_empty() {
            self.params
                .push(key, tags.iter().map(String::as_str).collect::<Vec<_>>().join(","));
        }
    }

    fn ages(&mut self, key: &str, ages: &[u32]) {
        if !ages.is_empty() {
            let joined = ages
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            self.params.push(key, joined);
        }
    }

    fn flag(&mut self, key: &str, value: bool) {
        if value {
            self.params.push(key, "true");
        }
    }

    fn sort(&mut self, key: &str, value: SortOrder) {
        if value != SortOrder::default() {
            self.params.push(key, value.as_str());
        }
    }

    fn finish(self) -> QueryParams {
        self.params
    }
}

// Tags travel comma-joined in the URL, so a tag must survive a split-and-trim
fn normalize_tag(tag: &str) -> Result<String, FilterError> {
    let trimmed = tag.trim();
    if trimmed.is_empty() || trimmed.contains(',') {
        return Err(FilterError::InvalidTag(tag.to_string()));
    }
    Ok(trimmed.to_string())
}

fn normalize_tags(tags: TagSet) -> Result<TagSet, FilterError> {
    tags.iter().map(|tag| normalize_tag(tag)).collect()
}

// Returns whether the tag is selected after the toggle
fn toggle(tags: &mut TagSet, tag: &str) -> Result<bool, FilterError> {
    let tag = normalize_tag(tag)?;
    if tags.remove(&tag) {
        Ok(false)
    } else {
        tags.insert(tag);
        Ok(true)
    }
}

fn check_ranges(
    price_min: u32,
    price_max: u32,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), FilterError> {
    if price_min > price_max {
        return Err(FilterError::InvertedPriceRange {
            min: price_min,
            max: price_max,
        });
    }
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(FilterError::InvertedDateRange { start, end });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelFilters {
    pub destination: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub children_ages: Vec<u32>,
    pub rooms: u32,
    pub property_types: TagSet,
    pub price_min: u32,
    pub price_max: u32,
    pub rating: u8,
    pub amenities: TagSet,
    pub free_cancellation: bool,
    pub pay_at_property: bool,
    pub sort: SortOrder,
}

impl Default for HotelFilters {
    fn default() -> Self {
        Self {
            destination: String::new(),
            check_in: None,
            check_out: None,
            adults: DEFAULT_ADULTS,
            children: 0,
            children_ages: Vec::new(),
            rooms: DEFAULT_ROOMS,
            property_types: TagSet::new(),
            price_min: 0,
            price_max: HOTEL_PRICE_MAX,
            rating: 0,
            amenities: TagSet::new(),
            free_cancellation: false,
            pay_at_property: false,
            sort: SortOrder::default(),
        }
    }
}

/// Partial update for [`HotelFilters`]; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelFiltersPatch {
    pub destination: Option<String>,
    pub check_in: Option<Option<NaiveDate>>,
    pub check_out: Option<Option<NaiveDate>>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub children_ages: Option<Vec<u32>>,
    pub rooms: Option<u32>,
    pub property_types: Option<TagSet>,
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    pub rating: Option<u8>,
    pub amenities: Option<TagSet>,
    pub free_cancellation: Option<bool>,
    pub pay_at_property: Option<bool>,
    pub sort: Option<SortOrder>,
}

impl HotelFilters {
    fn hydrate(reader: &ParamReader<'_>) -> Self {
        Self {
            destination: reader.text("destination"),
            check_in: reader.date("checkIn"),
            check_out: reader.date("checkOut"),
            adults: reader.number("adults", DEFAULT_ADULTS),
            children: reader.number("children", 0),
            children_ages: reader.ages("childrenAges"),
            rooms: reader.number("rooms", DEFAULT_ROOMS),
            property_types: reader.tags("propertyType"),
            price_min: reader.number("priceMin", 0),
            price_max: reader.number("priceMax", HOTEL_PRICE_MAX),
            rating: reader.rating("rating"),
            amenities: reader.tags("amenities"),
            free_cancellation: reader.flag("freeCancellation"),
            pay_at_property: reader.flag("payAtProperty"),
            sort: reader.sort("sort"),
        }
    }

    /// The non-default fields as query parameters, without `mode`.
    pub fn query_params(&self) -> QueryParams {
        let mut writer = ParamWriter::new();
        writer.text("destination", &self.destination);
        writer.date("checkIn", self.check_in);
        writer.date("checkOut", self.check_out);
        writer.number("adults", self.adults, DEFAULT_ADULTS);
        writer.number("children", self.children, 0);
        writer.ages("childrenAges", &self.children_ages);
        writer.number("rooms", self.rooms, DEFAULT_ROOMS);
        writer.tags("propertyType", &self.property_types);
        writer.number("priceMin", self.price_min, 0);
        writer.number("priceMax", self.price_max, HOTEL_PRICE_MAX);
        writer.number("rating", u32::from(self.rating), 0);
        writer.tags("amenities", &self.amenities);
        writer.flag("freeCancellation", self.free_cancellation);
        writer.flag("payAtProperty", self.pay_at_property);
        writer.sort("sort", self.sort);
        writer.finish()
    }

    /// Merges the patch; nothing is changed when a tag in it is rejected.
    pub fn apply(&mut self, patch: HotelFiltersPatch) -> Result<(), FilterError> {
        let HotelFiltersPatch {
            destination,
            check_in,
            check_out,
            adults,
            children,
            children_ages,
            rooms,
            property_types,
            price_min,
            price_max,
            rating,
            amenities,
            free_cancellation,
            pay_at_property,
            sort,
        } = patch;
        let property_types = property_types.map(normalize_tags).transpose()?;
        let amenities = amenities.map(normalize_tags).transpose()?;

        if let Some(v) = destination {
            self.destination = v.trim().to_string();
        }
        if let Some(v) = check_in {
            self.check_in = v;
        }
        if let Some(v) = check_out {
            self.check_out = v;
        }
        if let Some(v) = adults {
            self.adults = v;
        }
        if let Some(v) = children {
            self.children = v;
        }
        if let Some(v) = children_ages {
            self.children_ages = v;
        }
        if let Some(v) = rooms {
            self.rooms = v;
        }
        if let Some(v) = property_types {
            self.property_types = v;
        }
        if let Some(v) = price_min {
            self.price_min = v;
        }
        if let Some(v) = price_max {
            self.price_max = v;
        }
        if let Some(v) = rating {
            self.rating = v.min(MAX_RATING);
        }
        if let Some(v) = amenities {
            self.amenities = v;
        }
        if let Some(v) = free_cancellation {
            self.free_cancellation = v;
        }
        if let Some(v) = pay_at_property {
            self.pay_at_property = v;
        }
        if let Some(v) = sort {
            self.sort = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        check_ranges(self.price_min, self.price_max, self.check_in, self.check_out)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourFilters {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub children_ages: Vec<u32>,
    pub categories: TagSet,
    pub durations: TagSet,
    pub languages: TagSet,
    pub features: TagSet,
    pub price_min: u32,
    pub price_max: u32,
    pub rating: u8,
    pub free_cancellation: bool,
    pub sort: SortOrder,
}

impl Default for TourFilters {
    fn default() -> Self {
        Self {
            destination: String::new(),
            start_date: None,
            end_date: None,
            adults: DEFAULT_ADULTS,
            children: 0,
            children_ages: Vec::new(),
            categories: TagSet::new(),
            durations: TagSet::new(),
            languages: TagSet::new(),
            features: TagSet::new(),
            price_min: 0,
            price_max: TOUR_PRICE_MAX,
            rating: 0,
            free_cancellation: false,
            sort: SortOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourFiltersPatch {
    pub destination: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub adults: Option<u32>,
    pub children: Option<u32>,
    pub children_ages: Option<Vec<u32>>,
    pub categories: Option<TagSet>,
    pub durations: Option<TagSet>,
    pub languages: Option<TagSet>,
    pub features: Option<TagSet>,
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    pub rating: Option<u8>,
    pub free_cancellation: Option<bool>,
    pub sort: Option<SortOrder>,
}

impl TourFilters {
    fn hydrate(reader: &ParamReader<'_>) -> Self {
        Self {
            destination: reader.text("destination"),
            start_date: reader.date("startDate"),
            end_date: reader.date("endDate"),
            adults: reader.number("adults", DEFAULT_ADULTS),
            children: reader.number("children", 0),
            children_ages: reader.ages("childrenAges"),
            categories: reader.tags("category"),
            durations: reader.tags("duration"),
            languages: reader.tags("language"),
            features: reader.tags("features"),
            price_min: reader.number("priceMin", 0),
            price_max: reader.number("priceMax", TOUR_PRICE_MAX),
            rating: reader.rating("rating"),
            free_cancellation: reader.flag("freeCancellation"),
            sort: reader.sort("sort"),
        }
    }

    pub fn query_params(&self) -> QueryParams {
        let mut writer = ParamWriter::new();
        writer.text("destination", &self.destination);
        writer.date("startDate", self.start_date);
        writer.date("endDate", self.end_date);
        writer.number("adults", self.adults, DEFAULT_ADULTS);
        writer.number("children", self.children, 0);
        writer.ages("childrenAges", &self.children_ages);
        writer.tags("category", &self.categories);
        writer.tags("duration", &self.durations);
        writer.tags("language", &self.languages);
        writer.tags("features", &self.features);
        writer.number("priceMin", self.price_min, 0);
        writer.number("priceMax", self.price_max, TOUR_PRICE_MAX);
        writer.number("rating", u32::from(self.rating), 0);
        writer.flag("freeCancellation", self.free_cancellation);
        writer.sort("sort", self.sort);
        writer.finish()
    }

    pub fn apply(&mut self, patch: TourFiltersPatch) -> Result<(), FilterError> {
        let TourFiltersPatch {
            destination,
            start_date,
            end_date,
            adults,
            children,
            children_ages,
            categories,
            durations,
            languages,
            features,
            price_min,
            price_max,
            rating,
            free_cancellation,
            sort,
        } = patch;
        let categories = categories.map(normalize_tags).transpose()?;
        let durations = durations.map(normalize_tags).transpose()?;
        let languages = languages.map(normalize_tags).transpose()?;
        let features = features.map(normalize_tags).transpose()?;

        if let Some(v) = destination {
            self.destination = v.trim().to_string();
        }
        if let Some(v) = start_date {
            self.start_date = v;
        }
        if let Some(v) = end_date {
            self.end_date = v;
        }
        if let Some(v) = adults {
            self.adults = v;
        }
        if let Some(v) = children {
            self.children = v;
        }
        if let Some(v) = children_ages {
            self.children_ages = v;
        }
        if let Some(v) = categories {
            self.categories = v;
        }
        if let Some(v) = durations {
            self.durations = v;
        }
        if let Some(v) = languages {
            self.languages = v;
        }
        if let Some(v) = features {
            self.features = v;
        }
        if let Some(v) = price_min {
            self.price_min = v;
        }
        if let Some(v) = price_max {
            self.price_max = v;
        }
        if let Some(v) = rating {
            self.rating = v.min(MAX_RATING);
        }
        if let Some(v) = free_cancellation {
            self.free_cancellation = v;
        }
        if let Some(v) = sort {
            self.sort = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        check_ranges(self.price_min, self.price_max, self.start_date, self.end_date)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

// Checkbox groups in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    PropertyType,
    Amenity,
    Category,
    Duration,
    Language,
    Feature,
}

impl TagField {
    pub fn mode(&self) -> Mode {
        match self {
            TagField::PropertyType | TagField::Amenity => Mode::Hotels,
            TagField::Category | TagField::Duration | TagField::Language | TagField::Feature => {
                Mode::Tours
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPatch {
    Hotels(HotelFiltersPatch),
    Tours(TourFiltersPatch),
}

impl FilterPatch {
    pub fn mode(&self) -> Mode {
        match self {
            FilterPatch::Hotels(_) => Mode::Hotels,
            FilterPatch::Tours(_) => Mode::Tours,
        }
    }
}

/// The full sidebar state: the active mode plus both filter schemas.
///
/// Only the active schema is hydrated from and serialized to the URL. The
/// inactive one is kept so switching back and forth does not lose selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    mode: Mode,
    hotels: HotelFilters,
    tours: TourFilters,
}

impl FilterState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn hydrate(params: &QueryParams) -> Self {
        let reader = ParamReader { params };
        let mode = Mode::parse(reader.raw("mode"));
        let mut state = Self::new(mode);
        match mode {
            Mode::Hotels => state.hotels = HotelFilters::hydrate(&reader),
            Mode::Tours => state.tours = TourFilters::hydrate(&reader),
        }
        state
    }

    pub fn from_query_str(query: &str) -> Self {
        Self::hydrate(&QueryParams::parse(query))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn hotels(&self) -> &HotelFilters {
        &self.hotels
    }

    pub fn tours(&self) -> &TourFilters {
        &self.tours
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn apply(&mut self, patch: FilterPatch) -> Result<(), FilterError> {
        match (self.mode, patch) {
            (Mode::Hotels, FilterPatch::Hotels(patch)) => self.hotels.apply(patch),
            (Mode::Tours, FilterPatch::Tours(patch)) => self.tours.apply(patch),
            (active, patch) => Err(FilterError::ModeMismatch {
                active,
                patch: patch.mode(),
            }),
        }
    }

    pub fn toggle(&mut self, field: TagField, tag: &str) -> Result<bool, FilterError> {
        if field.mode() != self.mode {
            return Err(FilterError::ModeMismatch {
                active: self.mode,
                patch: field.mode(),
            });
        }
        let tags = match field {
            TagField::PropertyType => &mut self.hotels.property_types,
            TagField::Amenity => &mut self.hotels.amenities,
            TagField::Category => &mut self.tours.categories,
            TagField::Duration => &mut self.tours.durations,
            TagField::Language => &mut self.tours.languages,
            TagField::Feature => &mut self.tours.features,
        };
        toggle(tags, tag)
    }

    /// `mode` followed by the active schema's non-default fields.
    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("mode", self.mode.as_str());
        let fields = match self.mode {
            Mode::Hotels => self.hotels.query_params(),
            Mode::Tours => self.tours.query_params(),
        };
        params.extend(fields.into_pairs());
        params
    }

    /// Resets the active schema and returns the query to navigate to.
    pub fn clear(&mut self) -> QueryParams {
        match self.mode {
            Mode::Hotels => self.hotels = HotelFilters::default(),
            Mode::Tours => self.tours = TourFilters::default(),
        }
        let mut params = QueryParams::new();
        params.push("mode", self.mode.as_str());
        params
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        match self.mode {
            Mode::Hotels => self.hotels.validate(),
            Mode::Tours => self.tours.validate(),
        }
    }

    pub fn href(&self, path: &str) -> String {
        format!("{}?{}", path, self.to_query_params())
    }
}
