use diesel::{dsl, ExpressionMethods, QueryDsl, RunQueryDsl};
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::money_spend::{MoneySpend, NewMoneySpend};
use crate::models::money_spend_schema::NewMoneySpendSchema;
use crate::request_io::{InputEditSpend, InputSchema, InputSpend};
use crate::schema::money_spend_schemas as schema_fields;
use crate::schema::money_spend_schemas::dsl::money_spend_schemas;
use crate::schema::money_spends as spend_fields;
use crate::schema::money_spends::dsl::money_spends;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    pub fn schema_exists(
        &mut self,
        user_uuid: Uuid,
        month: i32,
        year: i32,
        category: &str,
    ) -> Result<bool, DaoError> {
        Ok(dsl::select(dsl::exists(
            money_spend_schemas
                .filter(schema_fields::user_uuid.eq(user_uuid))
                .filter(schema_fields::month.eq(month))
                .filter(schema_fields::year.eq(year))
                .filter(schema_fields::category.eq(category)),
        ))
        .get_result(&mut self.db_thread_pool.get()?)?)
    }

    pub fn category_exists(&mut self, user_uuid: Uuid, category: &str) -> Result<bool, DaoError> {
        Ok(dsl::select(dsl::exists(
            money_spend_schemas
                .filter(schema_fields::user_uuid.eq(user_uuid))
                .filter(schema_fields::category.eq(category)),
        ))
        .get_result(&mut self.db_thread_pool.get()?)?)
    }

    pub fn create_schema(
        &mut self,
        user_uuid: Uuid,
        schema_data: &InputSchema,
    ) -> Result<usize, DaoError> {
        let new_schema = NewMoneySpendSchema {
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
            user_uuid,
            month: schema_data.month,
            year: schema_data.year,
            category: &schema_data.category,
            budget: schema_data.budget,
        };

        Ok(dsl::insert_into(money_spend_schemas)
            .values(&new_schema)
            .execute(&mut self.db_thread_pool.get()?)?)
    }

    // When no schema exists yet for the spend's (month, year, category), a zero-budget
    // schema row is created in the same transaction as the spend row.
    pub fn create_spend(
        &mut self,
        user_uuid: Uuid,
        spend_data: &InputSpend,
        with_new_schema: bool,
    ) -> Result<(), DaoError> {
        let mut db_connection = self.db_thread_pool.get()?;
        let current_time = chrono::Utc::now().naive_utc();

        let new_spend = NewMoneySpend {
            created_at: current_time,
            updated_at: None,
            user_uuid,
            spend_day: spend_data.spend_day,
            spend_month: spend_data.spend_month,
            spend_year: spend_data.spend_year,
            category: &spend_data.category,
            description: &spend_data.description,
            amount: spend_data.amount,
        };

        db_connection
            .build_transaction()
            .run::<_, diesel::result::Error, _>(|conn| {
                dsl::insert_into(money_spends)
                    .values(&new_spend)
                    .execute(conn)?;

                if with_new_schema {
                    let new_schema = NewMoneySpendSchema {
                        created_at: current_time,
                        updated_at: None,
                        user_uuid,
                        month: spend_data.spend_month,
                        year: spend_data.spend_year,
                        category: &spend_data.category,
                        budget: 0,
                    };

                    dsl::insert_into(money_spend_schemas)
                        .values(&new_schema)
                        .execute(conn)?;
                }

                Ok(())
            })?;

        Ok(())
    }

    // Spends carry no client-visible id, so the row to change is matched by its full
    // field tuple. The newest matching row wins.
    pub fn find_spend_by_fields(
        &mut self,
        user_uuid: Uuid,
        spend_data: &InputEditSpend,
    ) -> Result<MoneySpend, DaoError> {
        Ok(money_spends
            .filter(spend_fields::user_uuid.eq(user_uuid))
            .filter(spend_fields::spend_day.eq(spend_data.spend_day))
            .filter(spend_fields::spend_month.eq(spend_data.spend_month))
            .filter(spend_fields::spend_year.eq(spend_data.spend_year))
            .filter(spend_fields::category.eq(&spend_data.category))
            .filter(spend_fields::description.eq(&spend_data.description))
            .filter(spend_fields::amount.eq(spend_data.amount))
            .order(spend_fields::created_at.desc())
            .first::<MoneySpend>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn update_spend(
        &mut self,
        spend_id: i32,
        user_uuid: Uuid,
        spend_data: &InputEditSpend,
    ) -> Result<usize, DaoError> {
        Ok(dsl::update(
            money_spends
                .find(spend_id)
                .filter(spend_fields::user_uuid.eq(user_uuid)),
        )
        .set((
            spend_fields::updated_at.eq(chrono::Utc::now().naive_utc()),
            spend_fields::spend_day.eq(spend_data.changed_spend_day),
            spend_fields::spend_month.eq(spend_data.changed_spend_month),
            spend_fields::spend_year.eq(spend_data.changed_spend_year),
            spend_fields::category.eq(&spend_data.changed_category_into),
            spend_fields::description.eq(&spend_data.changed_description_into),
            spend_fields::amount.eq(spend_data.changed_amount_into),
        ))
        .execute(&mut self.db_thread_pool.get()?)?)
    }

    pub fn get_spends_for_month(
        &mut self,
        user_uuid: Uuid,
        month: i32,
        year: i32,
    ) -> Result<Vec<MoneySpend>, DaoError> {
        Ok(money_spends
            .filter(spend_fields::user_uuid.eq(user_uuid))
            .filter(spend_fields::spend_month.eq(month))
            .filter(spend_fields::spend_year.eq(year))
            .order(spend_fields::spend_day.asc())
            .load::<MoneySpend>(&mut self.db_thread_pool.get()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::prelude::*;

    use crate::db::user;
    use crate::models::money_spend_schema::MoneySpendSchema;
    use crate::test_env;

    fn generate_schema_input() -> InputSchema {
        let category_number = rand::thread_rng().gen_range::<u128, _>(u128::MIN..u128::MAX);

        InputSchema {
            month: rand::thread_rng().gen_range(1..=12),
            year: rand::thread_rng().gen_range(2000..=2100),
            category: format!("Category {category_number}"),
            budget: rand::thread_rng().gen_range(100_000..5_000_000),
        }
    }

    fn generate_spend_input(month: i32, year: i32, category: &str) -> InputSpend {
        InputSpend {
            spend_day: rand::thread_rng().gen_range(1..=28),
            spend_month: month,
            spend_year: year,
            category: String::from(category),
            description: String::from("Test purchase"),
            amount: rand::thread_rng().gen_range(1_000..100_000),
        }
    }

    fn load_schemas(user_uuid: Uuid, category: &str) -> Vec<MoneySpendSchema> {
        let mut db_connection = test_env::db::DB_THREAD_POOL.get().unwrap();
        money_spend_schemas
            .filter(schema_fields::user_uuid.eq(user_uuid))
            .filter(schema_fields::category.eq(category))
            .load::<MoneySpendSchema>(&mut db_connection)
            .unwrap()
    }

    #[test]
    fn test_create_schema() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = user::tests::generate_user().unwrap();
        let schema_input = generate_schema_input();

        assert!(!dao
            .schema_exists(
                created_user.user_uuid,
                schema_input.month,
                schema_input.year,
                &schema_input.category,
            )
            .unwrap());
        assert!(!dao
            .category_exists(created_user.user_uuid, &schema_input.category)
            .unwrap());

        dao.create_schema(created_user.user_uuid, &schema_input)
            .unwrap();

        assert!(dao
            .schema_exists(
                created_user.user_uuid,
                schema_input.month,
                schema_input.year,
                &schema_input.category,
            )
            .unwrap());
        assert!(dao
            .category_exists(created_user.user_uuid, &schema_input.category)
            .unwrap());

        let saved_schemas = load_schemas(created_user.user_uuid, &schema_input.category);
        assert_eq!(saved_schemas.len(), 1);
        assert_eq!(saved_schemas[0].budget, schema_input.budget);
    }

    #[test]
    fn test_create_spend_with_new_schema() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = user::tests::generate_user().unwrap();
        let spend_input = generate_spend_input(4, 2025, "Groceries");

        dao.create_spend(created_user.user_uuid, &spend_input, true)
            .unwrap();

        let saved_schemas = load_schemas(created_user.user_uuid, &spend_input.category);
        assert_eq!(saved_schemas.len(), 1);
        assert_eq!(saved_schemas[0].month, spend_input.spend_month);
        assert_eq!(saved_schemas[0].year, spend_input.spend_year);
        assert_eq!(saved_schemas[0].budget, 0);

        let saved_spends = dao
            .get_spends_for_month(
                created_user.user_uuid,
                spend_input.spend_month,
                spend_input.spend_year,
            )
            .unwrap();
        assert_eq!(saved_spends.len(), 1);
        assert_eq!(saved_spends[0].amount, spend_input.amount);
    }

    #[test]
    fn test_create_spend_with_existing_schema() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = user::tests::generate_user().unwrap();
        let schema_input = generate_schema_input();
        dao.create_schema(created_user.user_uuid, &schema_input)
            .unwrap();

        let spend_input = generate_spend_input(
            schema_input.month,
            schema_input.year,
            &schema_input.category,
        );
        dao.create_spend(created_user.user_uuid, &spend_input, false)
            .unwrap();

        let saved_schemas = load_schemas(created_user.user_uuid, &schema_input.category);
        assert_eq!(saved_schemas.len(), 1);
        assert_eq!(saved_schemas[0].budget, schema_input.budget);

        let saved_spends = dao
            .get_spends_for_month(created_user.user_uuid, schema_input.month, schema_input.year)
            .unwrap();
        assert_eq!(saved_spends.len(), 1);
    }

    #[test]
    fn test_find_and_update_spend() {
        let db_thread_pool = &*test_env::db::DB_THREAD_POOL;
        let mut dao = Dao::new(db_thread_pool);

        let created_user = user::tests::generate_user().unwrap();
        let spend_input = generate_spend_input(7, 2025, "Transport");

        dao.create_spend(created_user.user_uuid, &spend_input, true)
            .unwrap();

        let edit_input = InputEditSpend {
            spend_day: spend_input.spend_day,
            spend_month: spend_input.spend_month,
            spend_year: spend_input.spend_year,
            category: spend_input.category.clone(),
            description: spend_input.description.clone(),
            amount: spend_input.amount,
            changed_spend_day: spend_input.spend_day,
            changed_spend_month: spend_input.spend_month,
            changed_spend_year: spend_input.spend_year,
            changed_category_into: spend_input.category.clone(),
            changed_description_into: String::from("Corrected purchase"),
            changed_amount_into: spend_input.amount + 500,
        };

        let found_spend = dao
            .find_spend_by_fields(created_user.user_uuid, &edit_input)
            .unwrap();
        assert_eq!(found_spend.amount, spend_input.amount);
        assert!(found_spend.updated_at.is_none());

        let affected_row_count = dao
            .update_spend(found_spend.id, created_user.user_uuid, &edit_input)
            .unwrap();
        assert_eq!(affected_row_count, 1);

        let saved_spends = dao
            .get_spends_for_month(
                created_user.user_uuid,
                spend_input.spend_month,
                spend_input.spend_year,
            )
            .unwrap();
        assert_eq!(saved_spends.len(), 1);
        assert_eq!(saved_spends[0].description, "Corrected purchase");
        assert_eq!(saved_spends[0].amount, spend_input.amount + 500);
        assert!(saved_spends[0].updated_at.is_some());
    }
}
