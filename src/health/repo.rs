use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::health::scoring::{RiskLevel, Vitals};

/// One analysis result as persisted. Rows are written once and never
/// touched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HealthRecord {
    pub id: i64,
    pub user_id: i64,
    pub bmi: f64,
    pub heart_rate: f64,
    pub sleep: f64,
    pub bp: f64,
    pub risk_score: i64,
    pub risk_level: RiskLevel,
    pub recommendation: String,
    pub timestamp: String,
}

/// A record paired with the username that owns it, for the admin view.
#[derive(Debug, Clone, FromRow)]
pub struct RecordWithOwner {
    #[sqlx(flatten)]
    pub record: HealthRecord,
    pub username: String,
}

impl HealthRecord {
    /// Unconditional insert of one analysis outcome.
    pub async fn save(
        db: &SqlitePool,
        user_id: i64,
        vitals: &Vitals,
        score: u8,
        level: RiskLevel,
        recommendation: &str,
        timestamp: &str,
    ) -> sqlx::Result<HealthRecord> {
        sqlx::query_as::<_, HealthRecord>(
            r#"
            INSERT INTO records
                (user_id, bmi, heart_rate, sleep, bp, risk_score, risk_level, recommendation, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, bmi, heart_rate, sleep, bp, risk_score, risk_level, recommendation, timestamp
            "#,
        )
        .bind(user_id)
        .bind(vitals.bmi)
        .bind(vitals.heart_rate)
        .bind(vitals.sleep)
        .bind(vitals.bp)
        .bind(i64::from(score))
        .bind(level)
        .bind(recommendation)
        .bind(timestamp)
        .fetch_one(db)
        .await
    }

    /// The owner's records, most recent first. Order follows the row id
    /// (insertion order), not the stored timestamp string.
    pub async fn list_for_user(db: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<HealthRecord>> {
        sqlx::query_as::<_, HealthRecord>(
            r#"
            SELECT id, user_id, bmi, heart_rate, sleep, bp, risk_score, risk_level, recommendation, timestamp
            FROM records
            WHERE user_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Every record joined with its owning username, most recent first.
    pub async fn list_all_with_owner(db: &SqlitePool) -> sqlx::Result<Vec<RecordWithOwner>> {
        sqlx::query_as::<_, RecordWithOwner>(
            r#"
            SELECT records.id, records.user_id, records.bmi, records.heart_rate,
                   records.sleep, records.bp, records.risk_score, records.risk_level,
                   records.recommendation, records.timestamp, users.username
            FROM records
            JOIN users ON users.id = records.user_id
            ORDER BY records.id DESC
            "#,
        )
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::repo::{Role, User},
        db::test_pool,
        health::scoring::assess,
    };

    fn sample_vitals() -> Vitals {
        Vitals {
            bmi: 27.0,
            heart_rate: 95.0,
            sleep: 7.0,
            bp: 120.0,
        }
    }

    async fn save_for(db: &SqlitePool, user_id: i64, vitals: &Vitals, stamp: &str) -> HealthRecord {
        let a = assess(vitals);
        HealthRecord::save(
            db,
            user_id,
            vitals,
            a.score,
            a.level,
            a.recommendation(),
            stamp,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn saved_record_comes_back_unchanged() {
        let db = test_pool().await;
        let owner = User::create(&db, "alice", "h", Role::Admin).await.unwrap();

        let saved = save_for(&db, owner.id, &sample_vitals(), "2024-06-01 10:00:00").await;
        assert_eq!(saved.risk_score, 1);
        assert_eq!(saved.risk_level, RiskLevel::Low);

        let listed = HealthRecord::list_for_user(&db, owner.id).await.unwrap();
        assert_eq!(listed, vec![saved]);
    }

    #[tokio::test]
    async fn records_never_leak_across_owners() {
        let db = test_pool().await;
        let alice = User::create(&db, "alice", "h", Role::Admin).await.unwrap();
        let bob = User::create(&db, "bob", "h", Role::User).await.unwrap();

        save_for(&db, alice.id, &sample_vitals(), "2024-06-01 10:00:00").await;
        let bobs = save_for(
            &db,
            bob.id,
            &Vitals {
                bmi: 32.0,
                heart_rate: 110.0,
                sleep: 5.0,
                bp: 150.0,
            },
            "2024-06-01 11:00:00",
        )
        .await;

        let listed = HealthRecord::list_for_user(&db, bob.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], bobs);
        assert!(HealthRecord::list_for_user(&db, alice.id)
            .await
            .unwrap()
            .iter()
            .all(|r| r.user_id == alice.id));
    }

    #[tokio::test]
    async fn listing_follows_insertion_order_not_timestamps() {
        let db = test_pool().await;
        let owner = User::create(&db, "alice", "h", Role::Admin).await.unwrap();

        // Timestamps deliberately run backwards against insertion order.
        let first = save_for(&db, owner.id, &sample_vitals(), "2024-06-03 09:00:00").await;
        let second = save_for(&db, owner.id, &sample_vitals(), "2024-06-02 09:00:00").await;
        let third = save_for(&db, owner.id, &sample_vitals(), "2024-06-01 09:00:00").await;

        let ids: Vec<_> = HealthRecord::list_for_user(&db, owner.id)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn admin_listing_joins_owner_names() {
        let db = test_pool().await;
        let alice = User::create(&db, "alice", "h", Role::Admin).await.unwrap();
        let bob = User::create(&db, "bob", "h", Role::User).await.unwrap();

        save_for(&db, alice.id, &sample_vitals(), "2024-06-01 10:00:00").await;
        save_for(&db, bob.id, &sample_vitals(), "2024-06-01 11:00:00").await;

        let all = HealthRecord::list_all_with_owner(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        // Most recent insert first, with the right owner attached.
        assert_eq!(all[0].username, "bob");
        assert_eq!(all[0].record.user_id, bob.id);
        assert_eq!(all[1].username, "alice");
        assert!(all[0].record.id > all[1].record.id);
    }
}
