use crate::entities::{events, prelude::*};
use crate::models::Event;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

pub struct EventRepository {
    conn: DatabaseConnection,
}

impl EventRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_location(&self, location_id: i32) -> anyhow::Result<Vec<Event>> {
        let rows = Events::find()
            .filter(events::Column::LocationId.eq(location_id))
            .order_by_asc(events::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    pub async fn insert(&self, event: &Event) -> anyhow::Result<i32> {
        let result = Events::insert(active_model(event))
            .exec(&self.conn)
            .await?;
        Ok(result.last_insert_id)
    }

    /// Inserts every row or none of them.
    pub async fn insert_all(&self, rows: &[Event]) -> anyhow::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let txn = self.conn.begin().await?;

        Events::insert_many(rows.iter().map(active_model))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}

fn active_model(event: &Event) -> events::ActiveModel {
    events::ActiveModel {
        link: Set(event.link.clone()),
        name: Set(event.name.clone()),
        host: Set(event.host.clone()),
        event_date: Set(event.event_date.clone()),
        location_id: Set(event.location_id),
        ..Default::default()
    }
}
