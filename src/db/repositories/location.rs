use crate::entities::{locations, prelude::*};
use crate::models::Location;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All rows cached under `search_query`, oldest first.
    pub async fn find_by_query(&self, search_query: &str) -> anyhow::Result<Vec<Location>> {
        let rows = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .order_by_asc(locations::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Location::from).collect())
    }

    /// Inserts the record and returns the generated primary key.
    pub async fn insert(&self, location: &Location) -> anyhow::Result<i32> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        let result = Locations::insert(active_model).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }

    pub async fn count_by_query(&self, search_query: &str) -> anyhow::Result<u64> {
        use sea_orm::PaginatorTrait;

        let count = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .count(&self.conn)
            .await?;

        Ok(count)
    }
}
