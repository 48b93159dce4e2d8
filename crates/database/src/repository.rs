use crate::DbError;
use chrono::NaiveDate;
use configuration::SourceSettings;
use core_types::DailyRecord;
use sqlx::FromRow;
use sqlx::postgres::PgPool;

/// A validated reference to the pre-aggregated weather/sales table.
///
/// The environment selects the database (`{ENVIRONMENT}_{DATABASE}`, e.g.
/// `STAGING_TASTY_BYTES`), and inside it the relation is addressed as
/// `"{SCHEMA}"."{TABLE}"`. Because identifiers cannot be bound as query parameters
/// they are interpolated into the SQL text, so each part is restricted to ASCII
/// letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    environment: String,
    database: String,
    schema: String,
    table: String,
}

impl TableRef {
    pub fn new(environment: &str, database: &str, schema: &str, table: &str) -> Result<Self, DbError> {
        validate_identifier("source.environment", environment)?;
        validate_identifier("source.database", database)?;
        validate_identifier("source.schema", schema)?;
        validate_identifier("source.table", table)?;

        Ok(Self {
            environment: environment.to_string(),
            database: database.to_string(),
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }

    pub fn from_settings(settings: &SourceSettings) -> Result<Self, DbError> {
        Self::new(
            &settings.environment,
            &settings.database,
            &settings.schema,
            &settings.table,
        )
    }

    /// The database the connection must point at, e.g. `STAGING_TASTY_BYTES`.
    pub fn database_name(&self) -> String {
        format!("{}_{}", self.environment, self.database)
    }

    /// Postgres folds unquoted database names to lower case, so the comparison
    /// ignores ASCII case.
    pub fn is_expected_database(&self, current: &str) -> bool {
        self.database_name().eq_ignore_ascii_case(current)
    }

    /// The quoted, schema-qualified relation name.
    pub fn qualified_name(&self) -> String {
        format!("\"{}\".\"{}\"", self.schema, self.table)
    }

    /// `STAGING_TASTY_BYTES.HARMONIZED.WEATHER_HAMBURG`
    pub fn full_name(&self) -> String {
        format!("{}.{}.{}", self.database_name(), self.schema, self.table)
    }

    /// The query behind every report: one row per day, oldest first.
    pub fn select_daily_records_sql(&self) -> String {
        format!(
            r#"
            SELECT
                "DATE"::date AS date,
                "DAILY_SALES"::float8 AS daily_sales,
                "AVG_TEMPERATURE_CELSIUS"::float8 AS avg_temperature_celsius,
                "AVG_PRECIPITATION_MILLIMETERS"::float8 AS avg_precipitation_millimeters,
                "MAX_WIND_SPEED_100M_MPH"::float8 AS max_wind_speed_100m_mph
            FROM {}
            ORDER BY "DATE"
            "#,
            self.qualified_name()
        )
    }
}

fn validate_identifier(field: &'static str, value: &str) -> Result<(), DbError> {
    let valid = !value.is_empty()
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidIdentifier(field, value.to_string()))
    }
}

/// A row of the warehouse table, with the column names of the query above.
#[derive(Debug, Clone, FromRow)]
pub struct DbWeatherRow {
    pub date: NaiveDate,
    pub daily_sales: f64,
    pub avg_temperature_celsius: f64,
    pub avg_precipitation_millimeters: f64,
    pub max_wind_speed_100m_mph: f64,
}

impl TryFrom<DbWeatherRow> for DailyRecord {
    type Error = DbError;

    fn try_from(row: DbWeatherRow) -> Result<Self, Self::Error> {
        DailyRecord::new(
            row.date,
            row.daily_sales,
            row.avg_temperature_celsius,
            row.avg_precipitation_millimeters,
            row.max_wind_speed_100m_mph,
        )
        .map_err(|source| DbError::InvalidRow {
            date: row.date,
            source,
        })
    }
}

/// Reads daily records from the warehouse over a shared connection pool.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: PgPool,
    table: TableRef,
}

impl WarehouseRepository {
    /// Creates a new `WarehouseRepository` with a shared database connection pool.
    pub fn new(pool: PgPool, table: TableRef) -> Self {
        Self { pool, table }
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    /// Fetches every row of the table and validates it into a `DailyRecord`.
    pub async fn fetch_daily_records(&self) -> Result<Vec<DailyRecord>, DbError> {
        let current = sqlx::query_scalar::<_, String>("SELECT current_database()")
            .fetch_one(&self.pool)
            .await?;
        if !self.table.is_expected_database(&current) {
            return Err(DbError::WrongDatabase {
                expected: self.table.database_name(),
                actual: current,
            });
        }

        let sql = self.table.select_daily_records_sql();
        let rows = sqlx::query_as::<_, DbWeatherRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .into_iter()
            .map(DailyRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            table = %self.table.full_name(),
            records = records.len(),
            "Loaded daily records from the warehouse."
        );

        Ok(records)
    }
}
