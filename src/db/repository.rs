//! Database repository for CRUD operations.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Admin, AdminRole, Contact, CreateAdminRequest, CreateContactRequest, Event, Member,
    NewEvent, SystemData, SystemDataInput, Team, UpdateAdminRequest, UpdateContactRequest,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== EVENT OPERATIONS ====================

    /// List all events in insertion order.
    pub async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query(
            "SELECT id, schedule, venue, title, event_type, fee, description, community, register_link, payment_name, prize, duration, team_size, image_path, image_mime_type FROM events"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(event_from_row).collect())
    }

    /// Get an event by ID.
    pub async fn get_event(&self, id: &str) -> Result<Option<Event>, AppError> {
        let row = sqlx::query(
            "SELECT id, schedule, venue, title, event_type, fee, description, community, register_link, payment_name, prize, duration, team_size, image_path, image_mime_type FROM events WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(event_from_row))
    }

    /// Create a new event.
    pub async fn create_event(&self, new_event: &NewEvent) -> Result<Event, AppError> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO events (id, schedule, venue, title, event_type, fee, description, community, register_link, payment_name, prize, duration, team_size, image_path, image_mime_type) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&new_event.schedule)
        .bind(&new_event.venue)
        .bind(&new_event.title)
        .bind(&new_event.event_type)
        .bind(&new_event.fee)
        .bind(&new_event.description)
        .bind(&new_event.community)
        .bind(&new_event.register_link)
        .bind(&new_event.payment_name)
        .bind(&new_event.prize)
        .bind(&new_event.duration)
        .bind(new_event.team_size)
        .bind(&new_event.image_path)
        .bind(&new_event.image_mime_type)
        .execute(&self.pool)
        .await?;

        Ok(Event {
            id,
            schedule: new_event.schedule.clone(),
            venue: new_event.venue.clone(),
            title: new_event.title.clone(),
            event_type: new_event.event_type.clone(),
            fee: new_event.fee.clone(),
            description: new_event.description.clone(),
            community: new_event.community.clone(),
            register_link: new_event.register_link.clone(),
            payment_name: new_event.payment_name.clone(),
            prize: new_event.prize.clone(),
            duration: new_event.duration.clone(),
            team_size: new_event.team_size,
            image_path: new_event.image_path.clone(),
            image_mime_type: new_event.image_mime_type.clone(),
        })
    }

    /// Delete an event.
    pub async fn delete_event(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        Ok(())
    }

    // ==================== ADMIN OPERATIONS ====================

    /// List all admins, password fields included.
    pub async fn list_admins(&self) -> Result<Vec<Admin>, AppError> {
        let rows = sqlx::query("SELECT id, name, username, role, password FROM admins")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(admin_from_row).collect())
    }

    /// Find an admin by username.
    pub async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, AppError> {
        let row = sqlx::query("SELECT id, name, username, role, password FROM admins WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(admin_from_row))
    }

    /// Create a new admin. The caller is expected to have run the
    /// username-uniqueness pre-check; the UNIQUE index catches lost races.
    pub async fn create_admin(&self, request: &CreateAdminRequest) -> Result<Admin, AppError> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO admins (id, name, username, role, password) VALUES (?, ?, ?, ?, ?)")
            .bind(&id)
            .bind(&request.name)
            .bind(&request.username)
            .bind(request.role.as_str())
            .bind(&request.password)
            .execute(&self.pool)
            .await?;

        Ok(Admin {
            id,
            name: request.name.clone(),
            username: request.username.clone(),
            role: request.role,
            password: request.password.clone(),
        })
    }

    /// Update an admin, overwriting all four fields.
    pub async fn update_admin(
        &self,
        id: &str,
        request: &UpdateAdminRequest,
    ) -> Result<Admin, AppError> {
        let result = sqlx::query(
            "UPDATE admins SET name = ?, username = ?, role = ?, password = ? WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.username)
        .bind(request.role.as_str())
        .bind(&request.password)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Admin not found".to_string()));
        }

        Ok(Admin {
            id: id.to_string(),
            name: request.name.clone(),
            username: request.username.clone(),
            role: request.role,
            password: request.password.clone(),
        })
    }

    /// Delete an admin.
    pub async fn delete_admin(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Admin not found".to_string()));
        }

        Ok(())
    }

    // ==================== CONTACT OPERATIONS ====================

    /// List all contacts.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, email, phone, message, created_at FROM contacts",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(contact_from_row).collect())
    }

    /// Get a contact by ID.
    pub async fn get_contact(&self, id: &str) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, email, phone, message, created_at FROM contacts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(contact_from_row))
    }

    /// Create a new contact with a server-assigned creation timestamp.
    pub async fn create_contact(&self, request: &CreateContactRequest) -> Result<Contact, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO contacts (id, first_name, last_name, email, phone, message, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.message)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Contact {
            id,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            message: request.message.clone(),
            created_at: now,
        })
    }

    /// Update a contact, overwriting all five editable fields. The creation
    /// timestamp is preserved.
    pub async fn update_contact(
        &self,
        id: &str,
        request: &UpdateContactRequest,
    ) -> Result<Contact, AppError> {
        let existing = self
            .get_contact(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact not found".to_string()))?;

        sqlx::query(
            "UPDATE contacts SET first_name = ?, last_name = ?, email = ?, phone = ?, message = ? WHERE id = ?"
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.message)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Contact {
            id: id.to_string(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            message: request.message.clone(),
            created_at: existing.created_at,
        })
    }

    /// Delete a contact.
    pub async fn delete_contact(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Contact not found".to_string()));
        }

        Ok(())
    }

    // ==================== SYSTEM DATA OPERATIONS ====================

    /// Fetch the singleton system-data record, if it was ever created.
    pub async fn get_system_data(&self) -> Result<Option<SystemData>, AppError> {
        let row = sqlx::query(
            "SELECT social_media_links, milestones, logo_name, logo_image_path, office_details, promo_video_path, created_at, updated_at FROM system_data WHERE id = 1"
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(system_data_from_row))
    }

    /// Create or fully replace the singleton system-data record.
    ///
    /// Returns the stored record and whether it was newly created. The write
    /// targets the fixed key, so concurrent upserts cannot produce a second
    /// record; the creation timestamp survives overwrites.
    pub async fn upsert_system_data(
        &self,
        input: &SystemDataInput,
    ) -> Result<(SystemData, bool), AppError> {
        let existing = self.get_system_data().await?;
        let created = existing.is_none();

        let now = Utc::now().to_rfc3339();
        let created_at = existing.map(|d| d.created_at).unwrap_or_else(|| now.clone());

        let links_json = serde_json::to_string(&input.social_media_links)?;
        let milestones_json = serde_json::to_string(&input.milestones)?;
        let office_json = serde_json::to_string(&input.office_details)?;

        sqlx::query(
            r#"INSERT INTO system_data (id, social_media_links, milestones, logo_name, logo_image_path, office_details, promo_video_path, created_at, updated_at)
               VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   social_media_links = excluded.social_media_links,
                   milestones = excluded.milestones,
                   logo_name = excluded.logo_name,
                   logo_image_path = excluded.logo_image_path,
                   office_details = excluded.office_details,
                   promo_video_path = excluded.promo_video_path,
                   updated_at = excluded.updated_at"#,
        )
        .bind(&links_json)
        .bind(&milestones_json)
        .bind(&input.logo.name)
        .bind(&input.logo.image_path)
        .bind(&office_json)
        .bind(&input.promo_video_path)
        .bind(&created_at)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok((
            SystemData {
                social_media_links: input.social_media_links.clone(),
                milestones: input.milestones.clone(),
                logo: input.logo.clone(),
                office_details: input.office_details.clone(),
                promo_video_path: input.promo_video_path.clone(),
                created_at,
                updated_at: now,
            },
            created,
        ))
    }

    // ==================== TEAM OPERATIONS ====================

    /// List all teams.
    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let rows = sqlx::query("SELECT id, title, members FROM teams")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(team_from_row).collect())
    }

    /// Create a new team with its resolved member list.
    pub async fn create_team(&self, title: &str, members: &[Member]) -> Result<Team, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let members_json = serde_json::to_string(members)?;

        sqlx::query("INSERT INTO teams (id, title, members) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(title)
            .bind(&members_json)
            .execute(&self.pool)
            .await?;

        Ok(Team {
            id,
            title: title.to_string(),
            members: members.to_vec(),
        })
    }

    /// Fully replace a team's title and member list. Returns `None` when the
    /// id is unmatched.
    pub async fn update_team(
        &self,
        id: &str,
        title: &str,
        members: &[Member],
    ) -> Result<Option<Team>, AppError> {
        let members_json = serde_json::to_string(members)?;

        let result = sqlx::query("UPDATE teams SET title = ?, members = ? WHERE id = ?")
            .bind(title)
            .bind(&members_json)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Team {
            id: id.to_string(),
            title: title.to_string(),
            members: members.to_vec(),
        }))
    }

    /// Delete a team. Deleting an id with no matching record is a no-op.
    pub async fn delete_team(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// Helper functions for row conversion

fn event_from_row(row: &sqlx::sqlite::SqliteRow) -> Event {
    Event {
        id: row.get("id"),
        schedule: row.get("schedule"),
        venue: row.get("venue"),
        title: row.get("title"),
        event_type: row.get("event_type"),
        fee: row.get("fee"),
        description: row.get("description"),
        community: row.get("community"),
        register_link: row.get("register_link"),
        payment_name: row.get("payment_name"),
        prize: row.get("prize"),
        duration: row.get("duration"),
        team_size: row.get("team_size"),
        image_path: row.get("image_path"),
        image_mime_type: row.get("image_mime_type"),
    }
}

fn admin_from_row(row: &sqlx::sqlite::SqliteRow) -> Admin {
    let role: String = row.get("role");
    Admin {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
        role: AdminRole::from_str(&role).unwrap_or_default(),
        password: row.get("password"),
    }
}

fn contact_from_row(row: &sqlx::sqlite::SqliteRow) -> Contact {
    Contact {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        message: row.get("message"),
        created_at: row.get("created_at"),
    }
}

fn system_data_from_row(row: &sqlx::sqlite::SqliteRow) -> SystemData {
    let links: String = row.get("social_media_links");
    let milestones: String = row.get("milestones");
    let office: String = row.get("office_details");

    SystemData {
        social_media_links: serde_json::from_str(&links).unwrap_or_default(),
        milestones: serde_json::from_str(&milestones).unwrap_or_default(),
        logo: crate::models::Logo {
            name: row.get("logo_name"),
            image_path: row.get("logo_image_path"),
        },
        office_details: serde_json::from_str(&office).unwrap_or_default(),
        promo_video_path: row.get("promo_video_path"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn team_from_row(row: &sqlx::sqlite::SqliteRow) -> Team {
    let members: String = row.get("members");
    Team {
        id: row.get("id"),
        title: row.get("title"),
        members: serde_json::from_str(&members).unwrap_or_default(),
    }
}
