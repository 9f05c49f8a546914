// Listing and detail lookups with a fallback to bundled demo data.
//
// The backend is tried first. When it errors (or has no record), the demo set is
// used instead, filtered and sorted locally with the same filter set so the
// listing page still behaves.

use std::{
    cmp::Ordering as CmpOrdering,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use tracing::{debug, warn};

use crate::{
    api::ApiClient,
    filters::{
        FilterState, HotelFilters, Mode, SortOrder, TagSet, TourFilters, HOTEL_PRICE_MAX,
        TOUR_PRICE_MAX,
    },
    models::{Accommodation, Location, Tour},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Listings {
    Accommodations(Vec<Accommodation>),
    Tours(Vec<Tour>),
}

impl Listings {
    pub fn len(&self) -> usize {
        match self {
            Listings::Accommodations(items) => items.len(),
            Listings::Tours(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// The slider's top value means "and above"
fn within_price(price: f64, min: u32, max: u32, slider_max: u32) -> bool {
    price >= f64::from(min) && (max >= slider_max || price <= f64::from(max))
}

fn guests_fit(adults: u32, children: u32, capacity: u32) -> bool {
    capacity == 0 || adults.saturating_add(children) <= capacity
}

fn has_all(selected: &TagSet, offered: &[String]) -> bool {
    selected.iter().all(|tag| offered.contains(tag))
}

fn has_any(selected: &TagSet, offered: &[String]) -> bool {
    selected.is_empty() || offered.iter().any(|tag| selected.contains(tag))
}

pub fn filter_accommodations(items: &[Accommodation], filters: &HotelFilters) -> Vec<Accommodation> {
    let mut filtered = Vec::new();

    for item in items {
        let destination_ok = filters.destination.is_empty()
            || item.location.matches(&filters.destination)
            || item
                .name
                .to_lowercase()
                .contains(&filters.destination.to_lowercase());

        let price_ok = within_price(
            item.price_per_night,
            filters.price_min,
            filters.price_max,
            HOTEL_PRICE_MAX,
        );

        let rating_ok = item.rating >= f32::from(filters.rating);

        let type_ok =
            filters.property_types.is_empty() || filters.property_types.contains(&item.property_type);

        let amenities_ok = has_all(&filters.amenities, &item.amenities);

        let cancellation_ok = !filters.free_cancellation || item.free_cancellation;

        let payment_ok = !filters.pay_at_property || item.pay_at_property;

        let guests_ok = guests_fit(
            filters.adults,
            filters.children,
            item.max_guests.saturating_mul(filters.rooms.max(1)),
        );

        if destination_ok
            && price_ok
            && rating_ok
            && type_ok
            && amenities_ok
            && cancellation_ok
            && payment_ok
            && guests_ok
        {
            filtered.push(item.clone());
        }
    }

    sort_accommodations(&mut filtered, filters.sort);
    filtered
}

pub fn sort_accommodations(items: &mut [Accommodation], sort: SortOrder) {
    match sort {
        SortOrder::Recommended => {}
        SortOrder::PriceLowToHigh => {
            items.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night))
        }
        SortOrder::PriceHighToLow => {
            items.sort_by(|a, b| b.price_per_night.total_cmp(&a.price_per_night))
        }
        SortOrder::Rating => items.sort_by(|a, b| by_rating(a.rating, b.rating)),
        SortOrder::Popularity => items.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
    }
}

pub fn filter_tours(items: &[Tour], filters: &TourFilters) -> Vec<Tour> {
    let mut filtered = Vec::new();

    for item in items {
        let needle = filters.destination.to_lowercase();
        let destination_ok = needle.is_empty()
            || item.destination.to_lowercase().contains(&needle)
            || item.title.to_lowercase().contains(&needle);

        let price_ok = within_price(item.price, filters.price_min, filters.price_max, TOUR_PRICE_MAX);
        let rating_ok = item.rating >= f32::from(filters.rating);
        let category_ok = filters.categories.is_empty() || filters.categories.contains(&item.category);
        let duration_ok = filters.durations.is_empty() || filters.durations.contains(&item.duration);
        // a tour qualifies if it is guided in any of the chosen languages
        let language_ok = has_any(&filters.languages, &item.languages);
        let features_ok = has_all(&filters.features, &item.features);
        let cancellation_ok = !filters.free_cancellation || item.free_cancellation;
        let group_ok = guests_fit(filters.adults, filters.children, item.max_group_size);

        if destination_ok
            && price_ok
            && rating_ok
            && category_ok
            && duration_ok
            && language_ok
            && features_ok
            && cancellation_ok
            && group_ok
        {
            filtered.push(item.clone());
        }
    }

    sort_tours(&mut filtered, filters.sort);
    filtered
}

pub fn sort_tours(items: &mut [Tour], sort: SortOrder) {
    match sort {
        SortOrder::Recommended => {}
        SortOrder::PriceLowToHigh => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::PriceHighToLow => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortOrder::Rating => items.sort_by(|a, b| by_rating(a.rating, b.rating)),
        SortOrder::Popularity => items.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
    }
}

fn by_rating(a: f32, b: f32) -> CmpOrdering {
    b.total_cmp(&a)
}

/// Listings shipped with the client, served when the backend cannot answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoCatalog {
    accommodations: Vec<Accommodation>,
    tours: Vec<Tour>,
}

impl DemoCatalog {
    pub fn new(accommodations: Vec<Accommodation>, tours: Vec<Tour>) -> Self {
        Self {
            accommodations,
            tours,
        }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_accommodations(), builtin_tours())
    }

    pub fn accommodations(&self) -> &[Accommodation] {
        &self.accommodations
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn accommodation(&self, id: &str) -> Option<&Accommodation> {
        self.accommodations.iter().find(|item| item.id == id)
    }

    pub fn tour(&self, id: &str) -> Option<&Tour> {
        self.tours.iter().find(|item| item.id == id)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn accommodation(
    id: &str,
    name: &str,
    property_type: &str,
    city: &str,
    country: &str,
    price: f64,
    rating: f32,
    reviews: u32,
    amenities: &[&str],
    free_cancellation: bool,
    pay_at_property: bool,
    max_guests: u32,
) -> Accommodation {
    Accommodation {
        id: id.to_string(),
        name: name.to_string(),
        property_type: property_type.to_string(),
        location: Location {
            city: city.to_string(),
            country: country.to_string(),
            address: None,
        },
        price_per_night: price,
        currency: "USD".to_string(),
        rating,
        review_count: reviews,
        amenities: strings(amenities),
        free_cancellation,
        pay_at_property,
        max_guests,
        images: Vec::new(),
        description: String::new(),
    }
}

#[rustfmt::skip]
fn builtin_accommodations() -> Vec<Accommodation> {
    vec![
        accommodation(
            "demo-acc-1", "Alfama Courtyard Suites", "hotel", "Lisbon", "Portugal",
            145.0, 4.6, 812, &["wifi", "breakfast", "air-conditioning"], true, false, 3,
        ),
        accommodation(
            "demo-acc-2", "Seaside Villa Oia", "villa", "Santorini", "Greece",
            680.0, 4.9, 214, &["wifi", "pool", "kitchen", "sea-view"], false, false, 8,
        ),
        accommodation(
            "demo-acc-3", "Canal House Loft", "apartment", "Amsterdam", "Netherlands",
            210.0, 4.4, 530, &["wifi", "kitchen", "washer"], true, true, 4,
        ),
        accommodation(
            "demo-acc-4", "Shinjuku Capsule Stay", "hostel", "Tokyo", "Japan",
            38.0, 4.1, 1960, &["wifi", "lockers"], true, true, 1,
        ),
        accommodation(
            "demo-acc-5", "Atlas Mountain Riad", "guesthouse", "Marrakech", "Morocco",
            1250.0, 4.8, 97, &["breakfast", "pool", "spa", "parking"], false, true, 10,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn tour(
    id: &str,
    title: &str,
    destination: &str,
    category: &str,
    duration: &str,
    hours: u32,
    languages: &[&str],
    features: &[&str],
    price: f64,
    rating: f32,
    reviews: u32,
    free_cancellation: bool,
    max_group_size: u32,
) -> Tour {
    Tour {
        id: id.to_string(),
        title: title.to_string(),
        destination: destination.to_string(),
        category: category.to_string(),
        duration: duration.to_string(),
        duration_hours: hours,
        languages: strings(languages),
        features: strings(features),
        price,
        currency: "USD".to_string(),
        rating,
        review_count: reviews,
        free_cancellation,
        max_group_size,
        images: Vec::new(),
        description: String::new(),
    }
}

#[rustfmt::skip]
fn builtin_tours() -> Vec<Tour> {
    vec![
        tour(
            "demo-tour-1", "Lisbon Tasca Food Walk", "Lisbon", "food", "half-day", 4,
            &["en", "pt"], &["tastings", "small-group"], 75.0, 4.8, 1320, true, 12,
        ),
        tour(
            "demo-tour-2", "Caldera Sunset Sail", "Santorini", "cruise", "half-day", 5,
            &["en", "el"], &["hotel-pickup", "meal-included"], 160.0, 4.7, 640, true, 20,
        ),
        tour(
            "demo-tour-3", "Mt. Fuji & Hakone Day Trip", "Tokyo", "adventure", "full-day", 11,
            &["en", "ja"], &["hotel-pickup", "skip-the-line"], 120.0, 4.5, 2875, false, 40,
        ),
        tour(
            "demo-tour-4", "Sahara Desert Camp", "Marrakech", "adventure", "multi-day", 72,
            &["en", "fr", "ar"], &["hotel-pickup", "meal-included", "accommodation"], 340.0, 4.9, 410, false, 16,
        ),
    ]
}

pub struct CatalogService {
    client: Arc<ApiClient>,
    demo: DemoCatalog,
    fallbacks: AtomicUsize,
}

impl CatalogService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self::with_demo(client, DemoCatalog::builtin())
    }

    pub fn with_demo(client: Arc<ApiClient>, demo: DemoCatalog) -> Self {
        Self {
            client,
            demo,
            fallbacks: AtomicUsize::new(0),
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn demo(&self) -> &DemoCatalog {
        &self.demo
    }

    // Number of lookups answered from demo data
    pub fn fallback_count(&self) -> usize {
        self.fallbacks.load(Ordering::SeqCst)
    }

    fn fell_back(&self) {
        self.fallbacks.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn accommodations(&self, filters: &HotelFilters) -> Vec<Accommodation> {
        match self.client.list_accommodations(filters).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "accommodation listing unavailable, serving demo data");
                self.fell_back();
                filter_accommodations(self.demo.accommodations(), filters)
            }
        }
    }

    pub async fn accommodation(&self, id: &str) -> Option<Accommodation> {
        match self.client.get_accommodation(id).await {
            Ok(Some(item)) => return Some(item),
            Ok(None) => debug!(id, "accommodation not found, checking demo data"),
            Err(e) => warn!(id, error = %e, "accommodation lookup failed, checking demo data"),
        }
        let item = self.demo.accommodation(id).cloned();
        if item.is_some() {
            self.fell_back();
        }
        item
    }

    pub async fn tours(&self, filters: &TourFilters) -> Vec<Tour> {
        match self.client.list_tours(filters).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "tour listing unavailable, serving demo data");
                self.fell_back();
                filter_tours(self.demo.tours(), filters)
            }
        }
    }

    pub async fn tour(&self, id: &str) -> Option<Tour> {
        match self.client.get_tour(id).await {
            Ok(Some(item)) => return Some(item),
            Ok(None) => debug!(id, "tour not found, checking demo data"),
            Err(e) => warn!(id, error = %e, "tour lookup failed, checking demo data"),
        }
        let item = self.demo.tour(id).cloned();
        if item.is_some() {
            self.fell_back();
        }
        item
    }

    /// Runs the search for whichever mode the sidebar is in.
    pub async fn search(&self, state: &FilterState) -> Listings {
        match state.mode() {
            Mode::Hotels => Listings::Accommodations(self.accommodations(state.hotels()).await),
            Mode::Tours => Listings::Tours(self.tours(state.tours()).await),
        }
    }
}
