//! Sample aviation catalog for demos and local development.

use atlas_schema::ParameterLocation;
use serde_json::json;
use tracing::info;

use crate::db::{
    ApiCreate, CategoryCreate, DbActorHandle, EndpointCreate, EntityKind, EnvironmentCreate,
    OperationCreate, ParameterCreate, ProviderCreate, ResponseSchemaCreate, ServiceCreate,
};
use crate::error::CatalogError;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn some(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// Loads the sample catalog unless a provider already exists.
///
/// Returns `true` when data was written.
pub async fn seed_sample_data(db: &DbActorHandle) -> Result<bool, CatalogError> {
    if db.count(EntityKind::Provider).await? > 0 {
        info!("catalog already populated, skipping sample data");
        return Ok(false);
    }

    let aviation = db
        .create_category(CategoryCreate {
            name: "Aviation".to_string(),
            name_localized: some("طيران"),
            description: some("Flight tracking and aviation data services"),
            description_localized: some("خدمات تتبع الطيران وبيانات الطيران"),
        })
        .await?;
    let tracking = db
        .create_category(CategoryCreate {
            name: "Real-time Tracking".to_string(),
            name_localized: some("التتبع الفوري"),
            description: some("Live tracking and monitoring services"),
            description_localized: some("خدمات التتبع والمراقبة المباشرة"),
        })
        .await?;
    let analytics = db
        .create_category(CategoryCreate {
            name: "Data Analytics".to_string(),
            name_localized: some("تحليل البيانات"),
            description: some("Data analysis and reporting services"),
            description_localized: some("خدمات تحليل البيانات والتقارير"),
        })
        .await?;

    let fr24 = db
        .create_provider(ProviderCreate {
            name: "Flightradar24".to_string(),
            short_code: "FR24".to_string(),
            website_url: "https://www.flightradar24.com".to_string(),
            logo_url: some("https://www.flightradar24.com/static/images/fr24-logo.svg"),
            documentation_url: some("https://www.flightradar24.com/commercial/api"),
            geographic_coverage: some("Global"),
            data_sources: strings(&["ADS-B", "Radar", "Satellite", "MLAT"]),
            historical_data_available: true,
            historical_data_depth: some("7 years"),
            realtime_latency: some("< 5 seconds"),
            data_granularity: some("Per second"),
            data_completeness: some("95%+"),
            data_refresh_rate: some("1-5 seconds"),
            uptime_guarantee: some("99.9%"),
            service_level_agreement: some("24/7 support for enterprise"),
            support_channels: strings(&["Email", "Phone", "Live Chat"]),
            maintenance_windows: some("Sundays 02:00-04:00 UTC"),
            incident_response_time: some("< 15 minutes"),
            pricing_model: some("Subscription + Usage"),
            free_tier_available: true,
            compliance_standards: strings(&["GDPR", "CCPA", "SOC 2"]),
            data_retention_policy: some("7 years for historical data"),
            privacy_policy: some("https://www.flightradar24.com/privacy-policy"),
            terms_of_service: some("https://www.flightradar24.com/terms-and-conditions"),
            contact_info: Some(json!({
                "headquarters": "Stockholm, Sweden",
                "phone": "+46 8 120 277 30",
                "email": "support@flightradar24.com"
            })),
            support_email: some("api-support@flightradar24.com"),
            sales_contact: some("sales@flightradar24.com"),
            technical_contact: some("tech-support@flightradar24.com"),
            category_ids: vec![aviation.id.clone(), tracking.id.clone()],
            ..Default::default()
        })
        .await?;

    let flightaware = db
        .create_provider(ProviderCreate {
            name: "FlightAware".to_string(),
            short_code: "FA".to_string(),
            website_url: "https://flightaware.com".to_string(),
            logo_url: some("https://flightaware.com/images/fa_logo.svg"),
            documentation_url: some("https://flightaware.com/commercial/aeroapi/"),
            geographic_coverage: some("Global, strong US coverage"),
            data_sources: strings(&["FAA SWIM", "ADS-B", "Radar", "Airline feeds"]),
            historical_data_available: true,
            historical_data_depth: some("15+ years"),
            realtime_latency: some("< 10 seconds"),
            data_granularity: some("Per minute"),
            data_completeness: some("98%+"),
            data_refresh_rate: some("30-60 seconds"),
            uptime_guarantee: some("99.95%"),
            service_level_agreement: some("Enterprise support available"),
            support_channels: strings(&["Email", "Phone", "Documentation"]),
            maintenance_windows: some("Scheduled with 48h notice"),
            incident_response_time: some("< 30 minutes"),
            pricing_model: some("API calls + Subscription"),
            free_tier_available: true,
            compliance_standards: strings(&["GDPR", "CCPA", "HIPAA"]),
            data_retention_policy: some("15 years historical"),
            privacy_policy: some("https://flightaware.com/about/privacy"),
            terms_of_service: some("https://flightaware.com/about/termsofuse"),
            contact_info: Some(json!({
                "headquarters": "Houston, Texas, USA",
                "phone": "+1 713-588-6100",
                "email": "support@flightaware.com"
            })),
            support_email: some("aeroapi-support@flightaware.com"),
            sales_contact: some("sales@flightaware.com"),
            technical_contact: some("api-support@flightaware.com"),
            category_ids: vec![aviation.id.clone(), analytics.id.clone()],
            ..Default::default()
        })
        .await?;

    let planespotters = db
        .create_provider(ProviderCreate {
            name: "Planespotters".to_string(),
            short_code: "PS".to_string(),
            website_url: "https://www.planespotters.net".to_string(),
            logo_url: some("https://www.planespotters.net/images/logo.png"),
            documentation_url: some("https://api.planespotters.net/"),
            geographic_coverage: some("Global"),
            data_sources: strings(&["Community photos", "Aircraft databases", "Registration data"]),
            historical_data_available: true,
            historical_data_depth: some("20+ years"),
            realtime_latency: some("Near real-time"),
            data_granularity: some("Per aircraft"),
            data_completeness: some("90%+"),
            data_refresh_rate: some("Daily updates"),
            uptime_guarantee: some("99.5%"),
            service_level_agreement: some("Community support"),
            support_channels: strings(&["Email", "Forum"]),
            maintenance_windows: some("As needed"),
            incident_response_time: some("< 2 hours"),
            pricing_model: some("Free + Premium features"),
            free_tier_available: true,
            compliance_standards: strings(&["GDPR"]),
            data_retention_policy: some("Permanent for public data"),
            privacy_policy: some("https://www.planespotters.net/privacy"),
            terms_of_service: some("https://www.planespotters.net/terms"),
            contact_info: Some(json!({
                "headquarters": "Amsterdam, Netherlands",
                "email": "info@planespotters.net"
            })),
            support_email: some("api@planespotters.net"),
            sales_contact: some("premium@planespotters.net"),
            technical_contact: some("support@planespotters.net"),
            category_ids: vec![aviation.id.clone()],
            ..Default::default()
        })
        .await?;

    let fr24_id = fr24.provider.id;
    for (name, display_name, base_url, description) in [
        (
            "production",
            "Production",
            "https://api.flightradar24.com/v1",
            "Production environment for live data",
        ),
        (
            "sandbox",
            "Sandbox",
            "https://sandbox-api.flightradar24.com/v1",
            "Testing environment with sample data",
        ),
    ] {
        db.create_environment(EnvironmentCreate {
            provider_id: fr24_id.clone(),
            name: name.to_string(),
            display_name: display_name.to_string(),
            base_url: base_url.to_string(),
            description: some(description),
            is_active: Some(true),
        })
        .await?;
    }

    let flight_tracking = db
        .create_service(ServiceCreate {
            provider_id: fr24_id.clone(),
            name: "flight-tracking".to_string(),
            display_name: "Flight Tracking".to_string(),
            description: some("Real-time flight tracking and monitoring"),
            icon: some("plane"),
            version: some("1.0"),
            is_active: Some(true),
        })
        .await?;
    db.create_service(ServiceCreate {
        provider_id: fr24_id,
        name: "aircraft-data".to_string(),
        display_name: "Aircraft Data".to_string(),
        description: some("Aircraft information and specifications"),
        icon: some("database"),
        version: some("1.0"),
        is_active: Some(true),
    })
    .await?;

    let live_flights = db
        .create_api(ApiCreate {
            service_id: flight_tracking.service.id,
            name: "live-flights".to_string(),
            display_name: "Live Flights API".to_string(),
            description: some("Get real-time flight positions and status"),
            version: some("1.0"),
            base_path: some("/flights"),
            auth_type: some("API Key"),
            rate_limit: some("1000 requests/hour"),
            supported_formats: strings(&["JSON", "XML"]),
            api_design_style: some("REST"),
            documentation_url: some("https://www.flightradar24.com/commercial/api/live-flights"),
            swagger_url: some("https://api.flightradar24.com/v1/swagger.json"),
            category_ids: vec![tracking.id.clone()],
            ..Default::default()
        })
        .await?;

    let flights = db
        .create_endpoint(EndpointCreate {
            api_id: live_flights.api.id.clone(),
            name: "flights".to_string(),
            path: "/flights".to_string(),
            description: some("Get all live flights"),
            is_active: Some(true),
        })
        .await?;
    db.create_endpoint(EndpointCreate {
        api_id: live_flights.api.id,
        name: "flight-by-id".to_string(),
        path: "/flights/{flight_id}".to_string(),
        description: some("Get specific flight details"),
        is_active: Some(true),
    })
    .await?;

    let get_flights = db
        .create_operation(OperationCreate {
            endpoint_id: flights.endpoint.id,
            method: "GET".to_string(),
            operation_id: some("getFlights"),
            summary: some("Get live flights"),
            description: some("Retrieve real-time information about all active flights"),
            auth_required: Some(true),
            scopes: strings(&["flights:read"]),
            rate_limit: some("100 requests/minute"),
            default_response_format: some("json"),
            cacheable: true,
            cache_time: Some(30),
            is_active: Some(true),
        })
        .await?;
    let operation_id = get_flights.operation.id;

    let query_param = |name: &str, param_type: &str, description: &str| ParameterCreate {
        operation_id: operation_id.clone(),
        name: name.to_string(),
        param_type: param_type.to_string(),
        location: Some(ParameterLocation::Query),
        description: some(description),
        ..Default::default()
    };
    for param in [
        ParameterCreate {
            example: some("40.0,-74.0,41.0,-73.0"),
            pattern: some(r"^-?\d+\.\d+,-?\d+\.\d+,-?\d+\.\d+,-?\d+\.\d+$"),
            ..query_param(
                "bounds",
                "string",
                "Geographic bounds in format: lat1,lon1,lat2,lon2",
            )
        },
        ParameterCreate {
            example: some("B738"),
            max_length: Some(4),
            ..query_param("aircraft_type", "string", "Filter by aircraft type (ICAO code)")
        },
        ParameterCreate {
            example: some("UAL"),
            max_length: Some(3),
            ..query_param("airline", "string", "Filter by airline ICAO code")
        },
        ParameterCreate {
            default_value: some("100"),
            minimum: Some(1),
            maximum: Some(1000),
            ..query_param("limit", "integer", "Maximum number of flights to return")
        },
    ] {
        db.create_parameter(param).await?;
    }

    db.create_response_schema(ResponseSchemaCreate {
        operation_id,
        status_code: Some(200),
        media_type: some("application/json"),
        schema: Some(json!({
            "type": "object",
            "properties": {
                "flights": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "flight_id": { "type": "string", "example": "2b4f6d0e" },
                            "callsign": { "type": "string", "example": "UAL1234" },
                            "aircraft_type": { "type": "string", "example": "B738" },
                            "origin_airport": { "type": "string", "example": "KJFK" },
                            "destination_airport": { "type": "string", "example": "KLAX" },
                            "latitude": { "type": "number", "example": 40.7128 },
                            "longitude": { "type": "number", "example": -74.006 },
                            "altitude": { "type": "integer", "example": 35000 },
                            "status": { "type": "string", "example": "en-route" }
                        }
                    }
                },
                "total_count": { "type": "integer", "example": 150 },
                "timestamp": { "type": "string", "format": "date-time" }
            }
        })),
        description: some("List of live flights"),
        example: Some(json!({
            "flights": [{
                "flight_id": "2b4f6d0e",
                "callsign": "UAL1234",
                "aircraft_type": "B738",
                "origin_airport": "KJFK",
                "destination_airport": "KLAX",
                "latitude": 40.7128,
                "longitude": -74.006,
                "altitude": 35000,
                "status": "en-route"
            }],
            "total_count": 150,
            "timestamp": "2024-01-15T14:30:00Z"
        })),
    })
    .await?;

    let aeroapi = db
        .create_service(ServiceCreate {
            provider_id: flightaware.provider.id,
            name: "aeroapi".to_string(),
            display_name: "AeroAPI".to_string(),
            description: some("Comprehensive flight data and analytics"),
            icon: some("analytics"),
            version: some("4.0"),
            is_active: Some(true),
        })
        .await?;
    db.create_api(ApiCreate {
        service_id: aeroapi.service.id,
        name: "flight-data".to_string(),
        display_name: "Flight Data API".to_string(),
        description: some("Historical and real-time flight information"),
        version: some("4.0"),
        base_path: some("/aeroapi"),
        auth_type: some("API Key"),
        rate_limit: some("500 requests/month"),
        supported_formats: strings(&["JSON"]),
        api_design_style: some("REST"),
        documentation_url: some("https://flightaware.com/commercial/aeroapi/"),
        category_ids: vec![aviation.id.clone(), analytics.id],
        ..Default::default()
    })
    .await?;

    let photos = db
        .create_service(ServiceCreate {
            provider_id: planespotters.provider.id,
            name: "photos".to_string(),
            display_name: "Aircraft Photos".to_string(),
            description: some("Aircraft photography and spotting data"),
            icon: some("camera"),
            version: some("2.0"),
            is_active: Some(true),
        })
        .await?;
    db.create_api(ApiCreate {
        service_id: photos.service.id,
        name: "aircraft-photos".to_string(),
        display_name: "Aircraft Photos API".to_string(),
        description: some("High-quality aircraft photographs and data"),
        version: some("2.0"),
        base_path: some("/photos"),
        auth_type: some("API Key"),
        rate_limit: some("1000 requests/day"),
        supported_formats: strings(&["JSON"]),
        api_design_style: some("REST"),
        documentation_url: some("https://api.planespotters.net/docs"),
        category_ids: vec![aviation.id],
        ..Default::default()
    })
    .await?;

    info!("sample catalog loaded");
    Ok(true)
}
