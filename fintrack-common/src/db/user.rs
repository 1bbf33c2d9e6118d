use chrono::NaiveDateTime;
use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::user::User;
use crate::models::user_otp::NewUserOtp;
use crate::schema::user_otps as user_otp_fields;
use crate::schema::user_otps::dsl::user_otps;
use crate::schema::users as user_fields;
use crate::schema::users::dsl::users;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    pub fn get_user_by_uuid(&mut self, user_uuid: Uuid) -> Result<User, DaoError> {
        Ok(users
            .filter(user_fields::user_uuid.eq(user_uuid))
            .first::<User>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn get_user_by_phone_number(&mut self, phone_number: &str) -> Result<User, DaoError> {
        Ok(users
            .filter(user_fields::phone_number.eq(phone_number))
            .first::<User>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn phone_number_exists(&mut self, phone_number: &str) -> Result<bool, DaoError> {
        Ok(dsl::select(dsl::exists(
            users.filter(user_fields::phone_number.eq(phone_number)),
        ))
        .get_result(&mut self.db_thread_pool.get()?)?)
    }

    pub fn update_full_name(&mut self, user_uuid: Uuid, full_name: &str) -> Result<usize, DaoError> {
        Ok(
            dsl::update(users.filter(user_fields::user_uuid.eq(user_uuid)))
                .set((
                    user_fields::updated_at.eq(chrono::Utc::now().naive_utc()),
                    user_fields::full_name.eq(full_name),
                ))
                .execute(&mut self.db_thread_pool.get()?)?,
        )
    }

    pub fn mark_email_verified(&mut self, user_uuid: Uuid) -> Result<usize, DaoError> {
        Ok(
            dsl::update(users.filter(user_fields::user_uuid.eq(user_uuid)))
                .set((
                    user_fields::updated_at.eq(chrono::Utc::now().naive_utc()),
                    user_fields::verified_email.eq(true),
                ))
                .execute(&mut self.db_thread_pool.get()?)?,
        )
    }

    // The new phone number must be re-verified, so the phone number update and the
    // OTP replacement happen in one transaction.
    pub fn update_phone_number_and_reset_otp(
        &mut self,
        user_uuid: Uuid,
        phone_number: &str,
        otp_number: &str,
        otp_expired_at: NaiveDateTime,
    ) -> Result<(), DaoError> {
        let mut db_connection = self.db_thread_pool.get()?;
        let current_time = chrono::Utc::now().naive_utc();

        db_connection
            .build_transaction()
            .run::<_, diesel::result::Error, _>(|conn| {
                dsl::update(users.filter(user_fields::user_uuid.eq(user_uuid)))
                    .set((
                        user_fields::updated_at.eq(current_time),
                        user_fields::phone_number.eq(phone_number),
                        user_fields::verified_phone_number.eq(false),
                    ))
                    .execute(conn)?;

                diesel::delete(user_otps.filter(user_otp_fields::user_uuid.eq(user_uuid)))
                    .execute(conn)?;

                let new_otp = NewUserOtp {
                    created_at: current_time,
                    updated_at: None,
                    user_uuid,
                    otp_number,
                    expired_at: otp_expired_at,
                };

                dsl::insert_into(user_otps).values(&new_otp).execute(conn)?;

                Ok(())
            })?;

        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use rand::prelude::*;
    use std::time::{Duration, SystemTime};

    use crate::models::user::NewUser;
    use crate::models::user_otp::UserOtp;
    use crate::test_env;

    pub fn generate_user() -> Result<User, DaoError> {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;

        let user_number = rand::thread_rng().gen_range::<u128, _>(u128::MIN..u128::MAX);
        let phone_number = format!("08{:010}", rand::thread_rng().gen_range(0u64..10_000_000_000));
        let username = format!("user{user_number}");
        let username = &username[..username.len().min(20)];
        let email = format!("test_user{user_number}@test.com");

        let new_user = NewUser {
            user_uuid: Uuid::now_v7(),
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
            username,
            full_name: Some("Test User"),
            email: Some(&email),
            phone_number: Some(&phone_number),
            password_hash: None,
            pin_hash: None,
            pin_enabled: false,
            verified_email: false,
            verified_phone_number: false,
        };

        Ok(dsl::insert_into(users)
            .values(&new_user)
            .get_result::<User>(&mut db_thread_pool.get()?)?)
    }

    #[test]
    fn test_get_user_by_uuid_and_phone_number() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = generate_user().unwrap();
        let phone_number = created_user.phone_number.clone().unwrap();

        let by_uuid = dao.get_user_by_uuid(created_user.user_uuid).unwrap();
        assert_eq!(by_uuid.id, created_user.id);
        assert_eq!(by_uuid.username, created_user.username);

        let by_phone = dao.get_user_by_phone_number(&phone_number).unwrap();
        assert_eq!(by_phone.id, created_user.id);

        assert!(dao.phone_number_exists(&phone_number).unwrap());
        assert!(!dao.phone_number_exists("0000000000000").unwrap());
    }

    #[test]
    fn test_update_full_name() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = generate_user().unwrap();
        assert!(created_user.updated_at.is_none());

        let affected_row_count = dao
            .update_full_name(created_user.user_uuid, "Changed Name")
            .unwrap();
        assert_eq!(affected_row_count, 1);

        let updated_user = dao.get_user_by_uuid(created_user.user_uuid).unwrap();
        assert_eq!(updated_user.full_name.as_deref(), Some("Changed Name"));
        assert!(updated_user.updated_at.is_some());
    }

    #[test]
    fn test_mark_email_verified() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = generate_user().unwrap();
        assert!(!created_user.verified_email);

        dao.mark_email_verified(created_user.user_uuid).unwrap();

        let updated_user = dao.get_user_by_uuid(created_user.user_uuid).unwrap();
        assert!(updated_user.verified_email);
        assert!(updated_user.updated_at.is_some());
    }

    #[test]
    fn test_update_phone_number_and_reset_otp() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);
        let mut db_connection = db_thread_pool.get().unwrap();

        let created_user = generate_user().unwrap();

        let stale_otp = NewUserOtp {
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
            user_uuid: created_user.user_uuid,
            otp_number: "111111",
            expired_at: chrono::Utc::now().naive_utc(),
        };

        dsl::insert_into(user_otps)
            .values(&stale_otp)
            .execute(&mut db_connection)
            .unwrap();

        let new_phone_number =
            format!("08{:010}", rand::thread_rng().gen_range(0u64..10_000_000_000));
        let otp_expired_at = chrono::DateTime::<chrono::Utc>::from(
            SystemTime::now() + Duration::from_secs(15 * 60),
        )
        .naive_utc();

        dao.update_phone_number_and_reset_otp(
            created_user.user_uuid,
            &new_phone_number,
            "123456",
            otp_expired_at,
        )
        .unwrap();

        let updated_user = dao.get_user_by_uuid(created_user.user_uuid).unwrap();
        assert_eq!(updated_user.phone_number.as_deref(), Some(&new_phone_number[..]));
        assert!(!updated_user.verified_phone_number);

        let saved_otps = user_otps
            .filter(user_otp_fields::user_uuid.eq(created_user.user_uuid))
            .load::<UserOtp>(&mut db_connection)
            .unwrap();

        assert_eq!(saved_otps.len(), 1);
        assert_eq!(saved_otps[0].otp_number, "123456");
        // Postgres stores timestamps with microsecond precision
        assert_eq!(
            saved_otps[0].expired_at.and_utc().timestamp_micros(),
            otp_expired_at.and_utc().timestamp_micros(),
        );
    }
}
