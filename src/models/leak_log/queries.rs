use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::types::{CountBucket, LeakLog, LeakLogFilter, LeakLogPage, LeakLogStats, NewLeakLog, PageRequest, Pagination};

const SELECT_LEAK_LOG: &str = "\
    SELECT id, channel, source, content, author, detection_date, type, created_at \
    FROM leak_logs";

const NEWEST_FIRST: &str = " ORDER BY created_at DESC, id DESC";

/// Escape LIKE wildcards so user input matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &LeakLogFilter) {
    let mut joiner = " WHERE ";
    if !filter.source.is_empty() {
        qb.push(joiner).push("source LIKE ").push_bind(like_pattern(&filter.source)).push(" ESCAPE '\\'");
        joiner = " AND ";
    }
    if !filter.log_type.is_empty() {
        qb.push(joiner).push("type = ").push_bind(filter.log_type.clone());
        joiner = " AND ";
    }
    if !filter.channel.is_empty() {
        qb.push(joiner).push("channel LIKE ").push_bind(like_pattern(&filter.channel)).push(" ESCAPE '\\'");
    }
}

fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, query: &str) {
    let pattern = like_pattern(query);
    qb.push(" WHERE ");
    for (i, column) in ["content", "author", "source", "channel"].iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(*column).push(" LIKE ").push_bind(pattern.clone()).push(" ESCAPE '\\'");
    }
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM leak_logs")
        .fetch_one(pool)
        .await
}

pub async fn create(pool: &SqlitePool, log: &NewLeakLog) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO leak_logs (channel, source, content, author, detection_date, type) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&log.channel)
    .bind(&log.source)
    .bind(&log.content)
    .bind(&log.author)
    .bind(&log.detection_date)
    .bind(&log.log_type)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Filtered, newest-first page of leak logs.
pub async fn find_page(
    pool: &SqlitePool,
    filter: &LeakLogFilter,
    request: PageRequest,
) -> Result<LeakLogPage, sqlx::Error> {
    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM leak_logs");
    push_filter(&mut count_qb, filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_LEAK_LOG);
    push_filter(&mut qb, filter);
    qb.push(NEWEST_FIRST)
        .push(" LIMIT ")
        .push_bind(request.limit)
        .push(" OFFSET ")
        .push_bind(request.offset());
    let logs = qb.build_query_as::<LeakLog>().fetch_all(pool).await?;

    Ok(LeakLogPage { logs, pagination: Pagination::new(request, total) })
}

/// Substring search over content, author, source and channel.
pub async fn search(pool: &SqlitePool, query: &str, request: PageRequest) -> Result<LeakLogPage, sqlx::Error> {
    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM leak_logs");
    push_search(&mut count_qb, query);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_LEAK_LOG);
    push_search(&mut qb, query);
    qb.push(NEWEST_FIRST)
        .push(" LIMIT ")
        .push_bind(request.limit)
        .push(" OFFSET ")
        .push_bind(request.offset());
    let logs = qb.build_query_as::<LeakLog>().fetch_all(pool).await?;

    Ok(LeakLogPage { logs, pagination: Pagination::new(request, total) })
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<LeakLog>, sqlx::Error> {
    sqlx::query_as::<_, LeakLog>(&format!("{SELECT_LEAK_LOG} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<LeakLog>, sqlx::Error> {
    sqlx::query_as::<_, LeakLog>(&format!("{SELECT_LEAK_LOG}{NEWEST_FIRST} LIMIT ?1"))
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Up to `limit` newest rows matching the filter, for export.
pub async fn find_for_export(
    pool: &SqlitePool,
    filter: &LeakLogFilter,
    limit: i64,
) -> Result<Vec<LeakLog>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_LEAK_LOG);
    push_filter(&mut qb, filter);
    qb.push(NEWEST_FIRST).push(" LIMIT ").push_bind(limit);
    qb.build_query_as::<LeakLog>().fetch_all(pool).await
}

/// Counts grouped by the trimmed `column`, largest first. NULL and blank values are skipped.
pub(crate) async fn count_by(
    pool: &SqlitePool,
    column: &'static str,
    limit: Option<i64>,
) -> Result<Vec<CountBucket>, sqlx::Error> {
    let mut sql = format!(
        "SELECT TRIM({column}) AS label, COUNT(*) AS count FROM leak_logs \
         WHERE {column} IS NOT NULL AND TRIM({column}) <> '' \
         GROUP BY TRIM({column}) ORDER BY count DESC, label ASC"
    );
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    sqlx::query_as::<_, CountBucket>(&sql).fetch_all(pool).await
}

/// Totals plus the top sources, all types and the top channels.
pub async fn stats(pool: &SqlitePool) -> Result<LeakLogStats, sqlx::Error> {
    Ok(LeakLogStats {
        total_logs: count(pool).await?,
        sources: count_by(pool, "source", Some(10)).await?,
        types: count_by(pool, "type", None).await?,
        channels: count_by(pool, "channel", Some(10)).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
