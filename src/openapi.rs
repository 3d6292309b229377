use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    AvailabilityResponse, Booking, BookingPatch, BookingStatus, Building, BuildingPatch,
    Classroom, ClassroomPatch, CreatedUser, NewBooking, NewBuilding, NewClassroom, NewUser, Role,
    StatusChange, TimeSlot, User, UserPatch, UserStatus,
};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "query_token",
            SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::new("token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_users,
        crate::handlers::create_user,
        crate::handlers::get_current_user,
        crate::handlers::update_user,
        crate::handlers::list_buildings,
        crate::handlers::create_building,
        crate::handlers::update_building,
        crate::handlers::delete_building,
        crate::handlers::list_classrooms,
        crate::handlers::create_classroom,
        crate::handlers::update_classroom,
        crate::handlers::delete_classroom,
        crate::handlers::list_bookings,
        crate::handlers::get_booking,
        crate::handlers::create_booking,
        crate::handlers::update_booking,
        crate::handlers::update_booking_status,
        crate::handlers::delete_booking,
        crate::handlers::get_availability
    ),
    components(schemas(
        User,
        Role,
        UserStatus,
        NewUser,
        UserPatch,
        CreatedUser,
        Building,
        BuildingPatch,
        NewBuilding,
        Classroom,
        ClassroomPatch,
        NewClassroom,
        Booking,
        BookingPatch,
        BookingStatus,
        NewBooking,
        StatusChange,
        TimeSlot,
        AvailabilityResponse
    )),
    tags(
        (name = "meta", description = "Service information and health checks"),
        (name = "users", description = "Accounts and their access tokens"),
        (name = "buildings", description = "Campus buildings"),
        (name = "classrooms", description = "Bookable classrooms"),
        (name = "bookings", description = "Classroom bookings with conflict checks"),
        (name = "availability", description = "Per-day slot availability")
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;
