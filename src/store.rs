//! In-memory storage for users, buildings, classrooms and bookings.
//!
//! All tables live behind one `RwLock`. Booking writes check availability and
//! commit inside the same write guard, so two concurrent requests can never
//! both claim the same interval of a classroom.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::models::{
    AvailabilityResponse, Booking, BookingPatch, BookingStatus, Building, BuildingPatch,
    Classroom, ClassroomPatch, NewBooking, NewBuilding, NewClassroom, NewUser, Role, User,
    UserPatch, UserStatus,
};
use crate::schedule::{self, SlotGrid, TimeRange};
use crate::settings::Settings;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("User not found")]
    UserNotFound(Uuid),
    #[error("Email already exists")]
    EmailTaken(String),
    #[error("Building not found")]
    BuildingNotFound(Uuid),
    #[error("Classroom not found")]
    ClassroomNotFound(Uuid),
    #[error("Booking not found")]
    BookingNotFound(Uuid),
    #[error("Building {0} does not exist")]
    UnknownBuilding(Uuid),
    #[error("Classroom {0} does not exist")]
    UnknownClassroom(Uuid),
    #[error("startTime must be before endTime")]
    InvalidTimeRange,
    #[error("Classroom is not available for the selected time (conflicts with booking {conflicting})")]
    SlotUnavailable { conflicting: Uuid },
    #[error("Cannot delete building with existing classrooms")]
    BuildingInUse(Uuid),
    #[error("Cannot delete classroom with existing bookings")]
    ClassroomInUse(Uuid),
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingFilter {
    pub classroom_id: Option<Uuid>,
    #[param(value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
    pub user_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    fn matches(&self, booking: &Booking) -> bool {
        self.classroom_id.is_none_or(|id| booking.classroom_id == id)
            && self.date.is_none_or(|d| booking.date == d)
            && self.user_id.is_none_or(|id| booking.user_id == id)
            && self.status.is_none_or(|s| booking.status == s)
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    buildings: Vec<Building>,
    classrooms: Vec<Classroom>,
    bookings: Vec<Booking>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }

    fn ensure_free(
        &self,
        classroom_id: Uuid,
        date: NaiveDate,
        range: TimeRange,
        exclude: Option<Uuid>,
    ) -> Result<(), StoreError> {
        match schedule::find_conflict(&self.bookings, classroom_id, date, range, exclude) {
            Some(conflict) => Err(StoreError::SlotUnavailable {
                conflicting: conflict.id,
            }),
            None => Ok(()),
        }
    }

    fn booking_index(&self, id: Uuid) -> Result<usize, StoreError> {
        self.bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::BookingNotFound(id))
    }
}

#[derive(Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

fn account(name: &str, email: &str, role: Role, token: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status: UserStatus::Active,
        department: String::new(),
        phone: String::new(),
        bio: String::new(),
        created_at: now,
        updated_at: now,
        token: token.to_string(),
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the two bootstrap accounts bound to the configured tokens.
    pub fn with_accounts(settings: &Settings) -> Self {
        let tables = Tables {
            users: vec![
                account("Admin User", "admin@campus.example", Role::Admin, &settings.admin_token),
                account("Teacher User", "teacher@campus.example", Role::Teacher, &settings.auth_token),
            ],
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub async fn find_user_by_token(&self, token: &str) -> Option<User> {
        let tables = self.tables.read().await;
        tables.users.iter().find(|u| u.token == token).cloned()
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.tables.read().await.users.clone()
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, StoreError> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    pub async fn create_user(&self, new: NewUser, token: String) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&new.email, None) {
            return Err(StoreError::EmailTaken(new.email));
        }

        let mut user = account(&new.name, &new.email, new.role.unwrap_or(Role::Teacher), &token);
        user.department = new.department.unwrap_or_default();
        user.phone = new.phone.unwrap_or_default();
        user.bio = new.bio.unwrap_or_default();
        tables.users.push(user.clone());
        info!(user_id = %user.id, role = ?user.role, "user created");
        Ok(user)
    }

    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &patch.email
            && tables.email_taken(email, Some(id))
        {
            return Err(StoreError::EmailTaken(email.clone()));
        }
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::UserNotFound(id))?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(status) = patch.status {
            user.status = status;
        }
        if let Some(department) = patch.department {
            user.department = department;
        }
        if let Some(phone) = patch.phone {
            user.phone = phone;
        }
        if let Some(bio) = patch.bio {
            user.bio = bio;
        }
        user.updated_at = Utc::now();
        info!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    pub async fn list_buildings(&self) -> Vec<Building> {
        self.tables.read().await.buildings.clone()
    }

    pub async fn get_building(&self, id: Uuid) -> Result<Building, StoreError> {
        let tables = self.tables.read().await;
        tables
            .buildings
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(StoreError::BuildingNotFound(id))
    }

    pub async fn create_building(&self, new: NewBuilding) -> Building {
        let now = Utc::now();
        let building = Building {
            id: Uuid::new_v4(),
            name: new.name,
            location: new.location,
            description: new.description.unwrap_or_default(),
            floors: new.floors.unwrap_or(1),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.buildings.push(building.clone());
        info!(building_id = %building.id, "building created");
        building
    }

    pub async fn update_building(
        &self,
        id: Uuid,
        patch: BuildingPatch,
    ) -> Result<Building, StoreError> {
        let mut tables = self.tables.write().await;
        let building = tables
            .buildings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::BuildingNotFound(id))?;

        if let Some(name) = patch.name {
            building.name = name;
        }
        if let Some(location) = patch.location {
            building.location = location;
        }
        if let Some(description) = patch.description {
            building.description = description;
        }
        if let Some(floors) = patch.floors {
            building.floors = floors;
        }
        building.updated_at = Utc::now();
        Ok(building.clone())
    }

    pub async fn delete_building(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .buildings
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::BuildingNotFound(id))?;
        if tables.classrooms.iter().any(|c| c.building_id == id) {
            return Err(StoreError::BuildingInUse(id));
        }
        tables.buildings.remove(index);
        info!(building_id = %id, "building deleted");
        Ok(())
    }

    pub async fn list_classrooms(&self, building_id: Option<Uuid>) -> Vec<Classroom> {
        let tables = self.tables.read().await;
        tables
            .classrooms
            .iter()
            .filter(|c| building_id.is_none_or(|id| c.building_id == id))
            .cloned()
            .collect()
    }

    pub async fn get_classroom(&self, id: Uuid) -> Result<Classroom, StoreError> {
        let tables = self.tables.read().await;
        tables
            .classrooms
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::ClassroomNotFound(id))
    }

    pub async fn create_classroom(&self, new: NewClassroom) -> Result<Classroom, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.buildings.iter().any(|b| b.id == new.building_id) {
            return Err(StoreError::UnknownBuilding(new.building_id));
        }

        let now = Utc::now();
        let classroom = Classroom {
            id: Uuid::new_v4(),
            building_id: new.building_id,
            name: new.name,
            capacity: new.capacity.unwrap_or(0),
            floor: new.floor.unwrap_or(1),
            has_projector: new.has_projector,
            has_ac: new.has_ac,
            is_computer_lab: new.is_computer_lab,
            description: new.description.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        tables.classrooms.push(classroom.clone());
        info!(classroom_id = %classroom.id, building_id = %classroom.building_id, "classroom created");
        Ok(classroom)
    }

    pub async fn update_classroom(
        &self,
        id: Uuid,
        patch: ClassroomPatch,
    ) -> Result<Classroom, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(building_id) = patch.building_id
            && !tables.buildings.iter().any(|b| b.id == building_id)
        {
            return Err(StoreError::UnknownBuilding(building_id));
        }
        let classroom = tables
            .classrooms
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::ClassroomNotFound(id))?;

        if let Some(building_id) = patch.building_id {
            classroom.building_id = building_id;
        }
        if let Some(name) = patch.name {
            classroom.name = name;
        }
        if let Some(capacity) = patch.capacity {
            classroom.capacity = capacity;
        }
        if let Some(floor) = patch.floor {
            classroom.floor = floor;
        }
        if let Some(has_projector) = patch.has_projector {
            classroom.has_projector = has_projector;
        }
        if let Some(has_ac) = patch.has_ac {
            classroom.has_ac = has_ac;
        }
        if let Some(is_computer_lab) = patch.is_computer_lab {
            classroom.is_computer_lab = is_computer_lab;
        }
        if let Some(description) = patch.description {
            classroom.description = description;
        }
        classroom.updated_at = Utc::now();
        Ok(classroom.clone())
    }

    pub async fn delete_classroom(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .classrooms
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::ClassroomNotFound(id))?;
        if tables.bookings.iter().any(|b| b.classroom_id == id) {
            return Err(StoreError::ClassroomInUse(id));
        }
        tables.classrooms.remove(index);
        info!(classroom_id = %id, "classroom deleted");
        Ok(())
    }

    pub async fn list_bookings(&self, filter: &BookingFilter) -> Vec<Booking> {
        let tables = self.tables.read().await;
        tables
            .bookings
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect()
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<Booking, StoreError> {
        let tables = self.tables.read().await;
        let index = tables.booking_index(id)?;
        Ok(tables.bookings[index].clone())
    }

    /// Check the slot and commit the booking under one write guard.
    pub async fn create_booking(
        &self,
        new: NewBooking,
        owner: &User,
        status: BookingStatus,
    ) -> Result<Booking, StoreError> {
        if new.start_time >= new.end_time {
            return Err(StoreError::InvalidTimeRange);
        }
        let range = TimeRange::new(new.start_time, new.end_time);

        let mut tables = self.tables.write().await;
        if !tables.classrooms.iter().any(|c| c.id == new.classroom_id) {
            return Err(StoreError::UnknownClassroom(new.classroom_id));
        }
        if status.occupies_slot() {
            tables.ensure_free(new.classroom_id, new.date, range, None)?;
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            classroom_id: new.classroom_id,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            status,
            user_id: owner.id,
            requester_name: owner.name.clone(),
            requester_email: owner.email.clone(),
            purpose: new.purpose.unwrap_or_default(),
            attendees: new.attendees.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        tables.bookings.push(booking.clone());
        info!(
            booking_id = %booking.id,
            classroom_id = %booking.classroom_id,
            date = %booking.date,
            start = %booking.start_time.format("%H:%M"),
            end = %booking.end_time.format("%H:%M"),
            "booking created"
        );
        Ok(booking)
    }

    /// Apply `patch`, re-checking the merged interval against every other booking.
    pub async fn update_booking(&self, id: Uuid, patch: BookingPatch) -> Result<Booking, StoreError> {
        let mut tables = self.tables.write().await;
        let index = tables.booking_index(id)?;
        let current = &tables.bookings[index];

        let classroom_id = patch.classroom_id.unwrap_or(current.classroom_id);
        let date = patch.date.unwrap_or(current.date);
        let start = patch.start_time.unwrap_or(current.start_time);
        let end = patch.end_time.unwrap_or(current.end_time);
        let status = current.status;

        if start >= end {
            return Err(StoreError::InvalidTimeRange);
        }
        if !tables.classrooms.iter().any(|c| c.id == classroom_id) {
            return Err(StoreError::UnknownClassroom(classroom_id));
        }
        if status.occupies_slot() {
            tables.ensure_free(classroom_id, date, TimeRange::new(start, end), Some(id))?;
        }

        let booking = &mut tables.bookings[index];
        booking.classroom_id = classroom_id;
        booking.date = date;
        booking.start_time = start;
        booking.end_time = end;
        if let Some(purpose) = patch.purpose {
            booking.purpose = purpose;
        }
        if let Some(attendees) = patch.attendees {
            booking.attendees = attendees;
        }
        booking.updated_at = Utc::now();
        info!(booking_id = %id, classroom_id = %classroom_id, date = %date, "booking updated");
        Ok(booking.clone())
    }

    /// Change a booking's status; reclaiming a cancelled booking needs its slot to be free again.
    pub async fn set_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking, StoreError> {
        let mut tables = self.tables.write().await;
        let index = tables.booking_index(id)?;
        let current = &tables.bookings[index];

        if !current.status.occupies_slot() && status.occupies_slot() {
            let range = TimeRange::new(current.start_time, current.end_time);
            tables.ensure_free(current.classroom_id, current.date, range, Some(id))?;
        }

        let booking = &mut tables.bookings[index];
        booking.status = status;
        booking.updated_at = Utc::now();
        info!(booking_id = %id, status = ?status, "booking status changed");
        Ok(booking.clone())
    }

    pub async fn delete_booking(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let index = tables.booking_index(id)?;
        tables.bookings.remove(index);
        info!(booking_id = %id, "booking deleted");
        Ok(())
    }

    /// Slot grid for one classroom and day, read from a single snapshot.
    pub async fn availability(
        &self,
        classroom_id: Uuid,
        date: NaiveDate,
        grid: &SlotGrid,
    ) -> Result<AvailabilityResponse, StoreError> {
        let tables = self.tables.read().await;
        let classroom = tables
            .classrooms
            .iter()
            .find(|c| c.id == classroom_id)
            .cloned()
            .ok_or(StoreError::ClassroomNotFound(classroom_id))?;
        let building = tables
            .buildings
            .iter()
            .find(|b| b.id == classroom.building_id)
            .cloned()
            .ok_or(StoreError::BuildingNotFound(classroom.building_id))?;

        let time_slots = schedule::generate_slots(&tables.bookings, classroom_id, date, grid);
        Ok(AvailabilityResponse {
            classroom,
            building,
            date,
            time_slots,
        })
    }

    /// Preload a small campus so a fresh instance has something to show.
    pub async fn seed_demo(&self) -> Result<(), StoreError> {
        let buildings = [
            ("Engineering Building", "North Campus", "Main engineering faculty building with classrooms and labs", 5),
            ("Science Building", "East Campus", "Houses science departments and research facilities", 4),
            ("Technology Hub", "South Campus", "Modern technology and computer science facility", 3),
        ];
        let mut building_ids = Vec::with_capacity(buildings.len());
        for (name, location, description, floors) in buildings {
            let building = self
                .create_building(NewBuilding {
                    name: name.to_string(),
                    location: location.to_string(),
                    description: Some(description.to_string()),
                    floors: Some(floors),
                })
                .await;
            building_ids.push(building.id);
        }

        // (building index, name, capacity, floor, computer lab, description)
        let classrooms = [
            (0, "E101", 35, 1, false, "Standard lecture room with projector and whiteboard"),
            (0, "E202", 50, 2, false, "Large lecture hall with tiered seating"),
            (0, "E305", 25, 3, true, "Computer lab with 25 workstations"),
            (1, "S101", 40, 1, false, "Science lecture room with demonstration table"),
            (1, "S205", 30, 2, false, "Biology lab with microscope stations"),
            (2, "T101", 60, 1, true, "Large computer lab with advanced workstations"),
        ];
        let mut classroom_ids = Vec::with_capacity(classrooms.len());
        for (building, name, capacity, floor, is_computer_lab, description) in classrooms {
            let classroom = self
                .create_classroom(NewClassroom {
                    building_id: building_ids[building],
                    name: name.to_string(),
                    capacity: Some(capacity),
                    floor: Some(floor),
                    has_projector: true,
                    has_ac: true,
                    is_computer_lab,
                    description: Some(description.to_string()),
                })
                .await?;
            classroom_ids.push(classroom.id);
        }

        let owner = {
            let tables = self.tables.read().await;
            tables.users.iter().find(|u| u.role == Role::Teacher).cloned()
        };
        let Some(owner) = owner else {
            info!("demo data seeded without bookings, no teacher account");
            return Ok(());
        };

        let today = Utc::now().date_naive();
        // (classroom index, day offset, start, end, purpose, status, attendees)
        let bookings = [
            (0, 1, (9, 0), (11, 0), "Introduction to Programming Lecture", BookingStatus::Confirmed, 30),
            (2, 2, (13, 0), (15, 0), "Advanced Programming Lab", BookingStatus::Confirmed, 20),
            (3, 3, (10, 0), (12, 0), "Physics Demonstration", BookingStatus::Pending, 35),
        ];
        for (classroom, offset, (sh, sm), (eh, em), purpose, status, attendees) in bookings {
            let (Some(start_time), Some(end_time)) =
                (NaiveTime::from_hms_opt(sh, sm, 0), NaiveTime::from_hms_opt(eh, em, 0))
            else {
                continue;
            };
            self.create_booking(
                NewBooking {
                    classroom_id: classroom_ids[classroom],
                    date: today + chrono::Duration::days(offset),
                    start_time,
                    end_time,
                    purpose: Some(purpose.to_string()),
                    attendees: Some(attendees),
                },
                &owner,
                status,
            )
            .await?;
        }
        info!("demo data seeded");
        Ok(())
    }
}
