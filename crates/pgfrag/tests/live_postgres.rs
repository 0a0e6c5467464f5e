//! Runs the generated fragments against a real database.
//!
//! Skipped unless `DATABASE_URL` is set (a `.env` file is honored).

use pgfrag::{
    ColumnMapping, CompanyFilter, Criteria, JobFilter, QueryFragment, UpdateData, Value,
    partial_update,
};

async fn try_connect() -> Option<tokio_postgres::Client> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (client, connection) = tokio_postgres::connect(&database_url, tokio_postgres::NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Some(client)
}

async fn seed(client: &tokio_postgres::Client) {
    client
        .batch_execute(
            "CREATE TEMP TABLE companies (
                 handle TEXT PRIMARY KEY,
                 name TEXT NOT NULL,
                 num_employees INTEGER,
                 logo_url TEXT
             );
             CREATE TEMP TABLE jobs (
                 id SERIAL PRIMARY KEY,
                 title TEXT NOT NULL,
                 salary INTEGER,
                 equity NUMERIC,
                 company_handle TEXT
             );
             INSERT INTO companies VALUES
                 ('c1', 'C1 Networks', 1, 'http://c1.img'),
                 ('c2', 'C2', 2, 'http://c2.img'),
                 ('c3', 'C3 Net', 3, NULL);
             INSERT INTO jobs (title, salary, equity, company_handle) VALUES
                 ('j1', 10000, 0, 'c1'),
                 ('j2', 15000, 0.012, 'c2'),
                 ('j3', 20000, 0, 'c1');",
        )
        .await
        .expect("seed temp tables");
}

async fn column(
    client: &tokio_postgres::Client,
    select: &str,
    filter: &QueryFragment,
    order_by: &str,
) -> Vec<String> {
    let sql = format!("{select} {filter} ORDER BY {order_by}");
    client
        .query(&sql, &filter.params_ref())
        .await
        .expect("filtered query")
        .iter()
        .map(|row| row.get(0))
        .collect()
}

#[tokio::test]
async fn company_filters_select_expected_rows() {
    let Some(client) = try_connect().await else {
        return;
    };
    seed(&client).await;
    let mapping = ColumnMapping::companies();
    let select = "SELECT handle FROM companies";

    let all = CompanyFilter::new().build(&mapping).unwrap();
    assert_eq!(column(&client, select, &all, "name").await, ["c1", "c2", "c3"]);

    let net = CompanyFilter::new().name_like("net").build(&mapping).unwrap();
    assert_eq!(column(&client, select, &net, "name").await, ["c1", "c3"]);

    let range = CompanyFilter::new()
        .min_employees(1)
        .max_employees(3)
        .build(&mapping)
        .unwrap();
    assert_eq!(column(&client, select, &range, "name").await, ["c2"]);
}

#[tokio::test]
async fn job_filters_select_expected_rows() {
    let Some(client) = try_connect().await else {
        return;
    };
    seed(&client).await;
    let mapping = ColumnMapping::jobs();
    let select = "SELECT title FROM jobs";

    let equity = JobFilter::new().has_equity(true).build(&mapping).unwrap();
    assert_eq!(column(&client, select, &equity, "title").await, ["j2"]);

    let no_equity_filter = JobFilter::new().has_equity(false).build(&mapping).unwrap();
    assert_eq!(
        column(&client, select, &no_equity_filter, "title").await,
        ["j1", "j2", "j3"]
    );

    let salary = JobFilter::new().title("j").min_salary(10000).build(&mapping).unwrap();
    assert_eq!(column(&client, select, &salary, "title").await, ["j2", "j3"]);
}

#[tokio::test]
async fn partial_update_binds_nulls() {
    let Some(client) = try_connect().await else {
        return;
    };
    seed(&client).await;

    let data = UpdateData::new()
        .set("name", "New")
        .set("numEmployees", 42)
        .set("logoUrl", Value::Null);
    let set = partial_update(data, &ColumnMapping::companies()).unwrap();
    let handle_idx = set.next_placeholder();
    let (set_cols, mut values) = set.into_parts();
    values.push(Value::from("c1"));

    let sql = format!(
        "UPDATE companies SET {set_cols} WHERE handle = {handle_idx} \
         RETURNING name, num_employees, logo_url"
    );
    let params: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> = values
        .iter()
        .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
        .collect();
    let row = client.query_one(&sql, &params).await.expect("update c1");

    assert_eq!(row.get::<_, String>(0), "New");
    assert_eq!(row.get::<_, Option<i32>>(1), Some(42));
    assert_eq!(row.get::<_, Option<String>>(2), None);
}

#[tokio::test]
async fn partial_update_writes_fractional_equity() {
    let Some(client) = try_connect().await else {
        return;
    };
    seed(&client).await;

    let data = UpdateData::new()
        .set("equity", 0.05)
        .set("salary", 12000);
    let set = partial_update(data, &ColumnMapping::jobs()).unwrap();
    let title_idx = set.next_placeholder();
    let (set_cols, mut values) = set.into_parts();
    values.push(Value::from("j1"));

    let sql = format!(
        "UPDATE jobs SET {set_cols} WHERE title = {title_idx} \
         RETURNING equity::text, salary"
    );
    let params: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> = values
        .iter()
        .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
        .collect();
    let row = client.query_one(&sql, &params).await.expect("update j1");

    assert_eq!(row.get::<_, String>(0), "0.05");
    assert_eq!(row.get::<_, Option<i32>>(1), Some(12000));

    let text = UpdateData::new().set("equity", "0.657");
    let set = partial_update(text, &ColumnMapping::jobs()).unwrap();
    let sql = format!(
        "UPDATE jobs SET {set} WHERE title = {} RETURNING equity::text",
        set.next_placeholder()
    );
    let mut params = set.params_ref();
    params.push(&"j1");
    let row = client.query_one(&sql, &params).await.expect("update j1 from text");
    assert_eq!(row.get::<_, String>(0), "0.657");
}
