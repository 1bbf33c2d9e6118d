use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::blacklist_token::NewBlacklistToken;
use crate::models::user_otp::UserOtp;
use crate::models::user_token::{NewUserToken, UserToken};
use crate::schema::blacklist_tokens as blacklist_token_fields;
use crate::schema::blacklist_tokens::dsl::blacklist_tokens;
use crate::schema::user_otps as user_otp_fields;
use crate::schema::user_otps::dsl::user_otps;
use crate::schema::user_tokens as user_token_fields;
use crate::schema::user_tokens::dsl::user_tokens;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    pub fn save_token_pair(
        &mut self,
        user_uuid: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<usize, DaoError> {
        let new_token_pair = NewUserToken {
            created_at: chrono::Utc::now().naive_utc(),
            user_uuid,
            access_token,
            refresh_token,
        };

        Ok(dsl::insert_into(user_tokens)
            .values(&new_token_pair)
            .execute(&mut self.db_thread_pool.get()?)?)
    }

    // The newest row is the user's current session
    pub fn get_latest_token_pair(&mut self, user_uuid: Uuid) -> Result<UserToken, DaoError> {
        Ok(user_tokens
            .filter(user_token_fields::user_uuid.eq(user_uuid))
            .order(user_token_fields::created_at.desc())
            .first::<UserToken>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn blacklist_token_pair(
        &mut self,
        user_uuid: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<usize, DaoError> {
        let blacklisted_pair = NewBlacklistToken {
            blacklisted_at: chrono::Utc::now().naive_utc(),
            user_uuid,
            access_token,
            refresh_token,
        };

        Ok(dsl::insert_into(blacklist_tokens)
            .values(&blacklisted_pair)
            .execute(&mut self.db_thread_pool.get()?)?)
    }

    pub fn is_access_token_blacklisted(&mut self, access_token: &str) -> Result<bool, DaoError> {
        Ok(dsl::select(dsl::exists(
            blacklist_tokens.filter(blacklist_token_fields::access_token.eq(access_token)),
        ))
        .get_result(&mut self.db_thread_pool.get()?)?)
    }

    pub fn is_refresh_token_blacklisted(&mut self, refresh_token: &str) -> Result<bool, DaoError> {
        Ok(dsl::select(dsl::exists(
            blacklist_tokens.filter(blacklist_token_fields::refresh_token.eq(refresh_token)),
        ))
        .get_result(&mut self.db_thread_pool.get()?)?)
    }

    pub fn get_latest_otp(&mut self, user_uuid: Uuid) -> Result<UserOtp, DaoError> {
        Ok(user_otps
            .filter(user_otp_fields::user_uuid.eq(user_uuid))
            .order(user_otp_fields::created_at.desc())
            .first::<UserOtp>(&mut self.db_thread_pool.get()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::prelude::*;
    use std::time::Duration;

    use crate::db::user;
    use crate::models::user_otp::NewUserOtp;
    use crate::test_env;

    fn generate_token_pair() -> (String, String) {
        let token_number = rand::thread_rng().gen_range::<u128, _>(u128::MIN..u128::MAX);
        (
            format!("access-token-{token_number}"),
            format!("refresh-token-{token_number}"),
        )
    }

    #[test]
    fn test_save_and_get_latest_token_pair() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = user::tests::generate_user().unwrap();
        let (first_access, first_refresh) = generate_token_pair();
        let (second_access, second_refresh) = generate_token_pair();

        dao.save_token_pair(created_user.user_uuid, &first_access, &first_refresh)
            .unwrap();
        std::thread::sleep(Duration::from_millis(5));
        dao.save_token_pair(created_user.user_uuid, &second_access, &second_refresh)
            .unwrap();

        let latest_pair = dao.get_latest_token_pair(created_user.user_uuid).unwrap();
        assert_eq!(latest_pair.user_uuid, created_user.user_uuid);
        assert_eq!(latest_pair.access_token, second_access);
        assert_eq!(latest_pair.refresh_token, second_refresh);
    }

    #[test]
    fn test_blacklist_token_pair() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = user::tests::generate_user().unwrap();
        let (access_token, refresh_token) = generate_token_pair();

        assert!(!dao.is_access_token_blacklisted(&access_token).unwrap());
        assert!(!dao.is_refresh_token_blacklisted(&refresh_token).unwrap());

        dao.blacklist_token_pair(created_user.user_uuid, &access_token, &refresh_token)
            .unwrap();

        assert!(dao.is_access_token_blacklisted(&access_token).unwrap());
        assert!(dao.is_refresh_token_blacklisted(&refresh_token).unwrap());
    }

    #[test]
    fn test_get_latest_otp() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);
        let mut db_connection = db_thread_pool.get().unwrap();

        let created_user = user::tests::generate_user().unwrap();
        let current_time = chrono::Utc::now().naive_utc();

        let older_otp = NewUserOtp {
            created_at: current_time - chrono::Duration::minutes(10),
            updated_at: None,
            user_uuid: created_user.user_uuid,
            otp_number: "111111",
            expired_at: current_time,
        };

        let newer_otp = NewUserOtp {
            created_at: current_time,
            updated_at: None,
            user_uuid: created_user.user_uuid,
            otp_number: "222222",
            expired_at: current_time + chrono::Duration::minutes(15),
        };

        dsl::insert_into(user_otps)
            .values(vec![&older_otp, &newer_otp])
            .execute(&mut db_connection)
            .unwrap();

        let latest_otp = dao.get_latest_otp(created_user.user_uuid).unwrap();
        assert_eq!(latest_otp.otp_number, "222222");
    }
}
