use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter, TransactionTrait,
};

use crate::db::entities::{artist, show, venue};
use crate::error::{AppError, Result};
use crate::forms::{ArtistForm, NewShow, VenueForm};

/// Commits the transaction when `outcome` is a success and rolls it back otherwise.
///
/// `txn` is consumed on every path, which hands its connection back to the pool.
async fn finish<T>(txn: DatabaseTransaction, action: &str, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            txn.commit().await?;
            tracing::info!("Committed: {}", action);
            Ok(value)
        }
        Err(e) => {
            tracing::warn!("Rolling back {}: {}", action, e);
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Rollback of {} failed: {}", action, rollback_err);
            }
            Err(e)
        }
    }
}

pub struct VenueRepository {
    db: DatabaseConnection,
}

impl VenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venue::Model>> {
        Ok(venue::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(&self, form: VenueForm) -> Result<venue::Model> {
        let txn = self.db.begin().await?;
        let outcome = form
            .into_active_model()
            .insert(&txn)
            .await
            .map_err(AppError::from);
        finish(txn, "create venue", outcome).await
    }

    /// Overwrites every column of the venue with the submitted form.
    pub async fn update(&self, id: i32, form: VenueForm) -> Result<venue::Model> {
        let txn = self.db.begin().await?;
        let outcome: Result<venue::Model> = async {
            let existing = venue::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

            let mut active = form.into_active_model();
            active.id = Unchanged(existing.id);
            Ok(active.update(&txn).await?)
        }
        .await;
        finish(txn, "update venue", outcome).await
    }

    /// Deletes the venue and every show booked there. Returns the removed row.
    pub async fn delete(&self, id: i32) -> Result<venue::Model> {
        let txn = self.db.begin().await?;
        let outcome: Result<venue::Model> = async {
            let existing = venue::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

            let removed = show::Entity::delete_many()
                .filter(show::Column::VenueId.eq(id))
                .exec(&txn)
                .await?;
            tracing::debug!(venue_id = id, shows = removed.rows_affected, "Removing venue shows");

            existing.clone().delete(&txn).await?;
            Ok(existing)
        }
        .await;
        finish(txn, "delete venue", outcome).await
    }
}

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(&self, form: ArtistForm) -> Result<artist::Model> {
        let txn = self.db.begin().await?;
        let outcome = form
            .into_active_model()
            .insert(&txn)
            .await
            .map_err(AppError::from);
        finish(txn, "create artist", outcome).await
    }

    /// Overwrites every column of the artist with the submitted form.
    pub async fn update(&self, id: i32, form: ArtistForm) -> Result<artist::Model> {
        let txn = self.db.begin().await?;
        let outcome: Result<artist::Model> = async {
            let existing = artist::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

            let mut active = form.into_active_model();
            active.id = Unchanged(existing.id);
            Ok(active.update(&txn).await?)
        }
        .await;
        finish(txn, "update artist", outcome).await
    }

    /// Deletes the artist and every show they were booked for. Returns the removed row.
    pub async fn delete(&self, id: i32) -> Result<artist::Model> {
        let txn = self.db.begin().await?;
        let outcome: Result<artist::Model> = async {
            let existing = artist::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

            let removed = show::Entity::delete_many()
                .filter(show::Column::ArtistId.eq(id))
                .exec(&txn)
                .await?;
            tracing::debug!(artist_id = id, shows = removed.rows_affected, "Removing artist shows");

            existing.clone().delete(&txn).await?;
            Ok(existing)
        }
        .await;
        finish(txn, "delete artist", outcome).await
    }
}

pub struct ShowRepository {
    db: DatabaseConnection,
}

impl ShowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<show::Model>> {
        Ok(show::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Inserts a show. Unknown artist or venue ids are rejected by the
    /// foreign keys and surface as a database error after rollback.
    pub async fn create(&self, new_show: NewShow, now: NaiveDateTime) -> Result<show::Model> {
        let txn = self.db.begin().await?;
        let outcome = new_show
            .into_active_model(now)
            .insert(&txn)
            .await
            .map_err(AppError::from);
        finish(txn, "create show", outcome).await
    }
}
