use crate::entities::{prelude::*, weathers};
use crate::models::Weather;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

pub struct WeatherRepository {
    conn: DatabaseConnection,
}

impl WeatherRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_location(&self, location_id: i32) -> anyhow::Result<Vec<Weather>> {
        let rows = Weathers::find()
            .filter(weathers::Column::LocationId.eq(location_id))
            .order_by_asc(weathers::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Weather::from).collect())
    }

    pub async fn insert(&self, weather: &Weather) -> anyhow::Result<i32> {
        let result = Weathers::insert(active_model(weather))
            .exec(&self.conn)
            .await?;
        Ok(result.last_insert_id)
    }

    /// Inserts every row or none of them.
    pub async fn insert_all(&self, rows: &[Weather]) -> anyhow::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let txn = self.conn.begin().await?;

        Weathers::insert_many(rows.iter().map(active_model))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}

fn active_model(weather: &Weather) -> weathers::ActiveModel {
    weathers::ActiveModel {
        forecast: Set(weather.forecast.clone()),
        time: Set(weather.time.clone()),
        location_id: Set(weather.location_id),
        ..Default::default()
    }
}
