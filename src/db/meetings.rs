use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{ActionItem, MeetingData, MeetingTask, Priority};

const MEETING_COLUMNS: &str = "id, title, date, summary, executive_summary,
         key_points, participants, duration, source";

pub fn insert_meeting(conn: &Connection, data: &MeetingData) -> Result<(), DatabaseError> {
    let key_points_json =
        serde_json::to_string(&data.key_points).unwrap_or_else(|_| "[]".to_string());
    let participants_json =
        serde_json::to_string(&data.participants).unwrap_or_else(|_| "[]".to_string());

    conn.execute(
        "INSERT INTO meetings (id, title, date, summary, executive_summary,
         key_points, participants, duration, source)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            data.id,
            data.title,
            data.date,
            data.summary,
            data.executive_summary,
            key_points_json,
            participants_json,
            data.duration,
            data.source,
        ],
    )?;

    for (idx, item) in data.action_items.iter().enumerate() {
        conn.execute(
            "INSERT INTO action_items
             (meeting_id, item_index, description, owner, due, priority, completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                data.id,
                idx as i64,
                item.text,
                item.owner,
                item.due,
                item.priority.as_str(),
                item.completed as i32,
            ],
        )?;
    }

    Ok(())
}

pub fn get_meeting(conn: &Connection, id: &str) -> Result<Option<MeetingData>, DatabaseError> {
    let sql = format!("SELECT {MEETING_COLUMNS} FROM meetings WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;

    let result = stmt.query_row(params![id], meeting_row);
    match result {
        Ok(row) => Ok(Some(meeting_from_row(conn, row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Look a meeting up by the transcript it was generated from. Drives the
/// already-processed check before a pipeline run.
pub fn get_meeting_by_source(
    conn: &Connection,
    source: &str,
) -> Result<Option<MeetingData>, DatabaseError> {
    let sql = format!("SELECT {MEETING_COLUMNS} FROM meetings WHERE source = ?1 LIMIT 1");
    let mut stmt = conn.prepare(&sql)?;

    let result = stmt.query_row(params![source], meeting_row);
    match result {
        Ok(row) => Ok(Some(meeting_from_row(conn, row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_meetings(conn: &Connection) -> Result<Vec<MeetingData>, DatabaseError> {
    let sql = format!("SELECT {MEETING_COLUMNS} FROM meetings ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map([], meeting_row)?;
    let mut meetings = Vec::new();
    for row in rows {
        meetings.push(meeting_from_row(conn, row?)?);
    }
    Ok(meetings)
}

/// (source, id) for every stored meeting, used to flag transcripts as
/// already processed.
pub fn meeting_sources(conn: &Connection) -> Result<Vec<(String, String)>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT source, id FROM meetings")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut pairs = Vec::new();
    for row in rows {
        pairs.push(row?);
    }
    Ok(pairs)
}

/// All high-priority action items across meetings. The legacy spelling
/// "urgent" counts as high; matched items always report `High`.
pub fn high_priority_tasks(conn: &Connection) -> Result<Vec<MeetingTask>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT meeting_id, item_index, description, owner, due, completed
         FROM action_items
         WHERE LOWER(priority) IN ('high', 'urgent')
         ORDER BY meeting_id, item_index",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i32>(5)?,
        ))
    })?;

    let mut tasks = Vec::new();
    for row in rows {
        let (meeting_id, item_index, description, owner, due, completed) = row?;
        tasks.push(MeetingTask {
            id: item_index.to_string(),
            text: description,
            owner,
            due,
            priority: Priority::High,
            completed: completed != 0,
            meeting_id,
        });
    }
    Ok(tasks)
}

/// Action items assigned to one owner, matched case-insensitively.
pub fn tasks_by_owner(conn: &Connection, owner: &str) -> Result<Vec<MeetingTask>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT meeting_id, item_index, description, owner, due, priority, completed
         FROM action_items
         WHERE LOWER(owner) = LOWER(?1)
         ORDER BY meeting_id, item_index",
    )?;

    let rows = stmt.query_map(params![owner], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, i32>(6)?,
        ))
    })?;

    let mut tasks = Vec::new();
    for row in rows {
        let (meeting_id, item_index, description, owner, due, priority, completed) = row?;
        tasks.push(MeetingTask {
            id: item_index.to_string(),
            text: description,
            owner,
            due,
            priority: Priority::normalize(&priority),
            completed: completed != 0,
            meeting_id,
        });
    }
    Ok(tasks)
}

/// Meetings a given participant attended, matched by exact name inside
/// the participants JSON column.
pub fn meetings_by_participant(
    conn: &Connection,
    name: &str,
) -> Result<Vec<MeetingData>, DatabaseError> {
    let sql = format!(
        "SELECT {MEETING_COLUMNS} FROM meetings
         WHERE EXISTS (SELECT 1 FROM json_each(meetings.participants)
                       WHERE json_each.value = ?1)
         ORDER BY created_at DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map(params![name], meeting_row)?;
    let mut meetings = Vec::new();
    for row in rows {
        meetings.push(meeting_from_row(conn, row?)?);
    }
    Ok(meetings)
}

// Internal row type for meeting mapping
struct MeetingRow {
    id: String,
    title: String,
    date: String,
    summary: String,
    executive_summary: String,
    key_points: String,
    participants: String,
    duration: String,
    source: String,
}

fn meeting_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MeetingRow> {
    Ok(MeetingRow {
        id: row.get(0)?,
        title: row.get(1)?,
        date: row.get(2)?,
        summary: row.get(3)?,
        executive_summary: row.get(4)?,
        key_points: row.get(5)?,
        participants: row.get(6)?,
        duration: row.get(7)?,
        source: row.get(8)?,
    })
}

fn meeting_from_row(conn: &Connection, row: MeetingRow) -> Result<MeetingData, DatabaseError> {
    let action_items = get_action_items(conn, &row.id)?;
    Ok(MeetingData {
        action_items,
        id: row.id,
        title: row.title,
        date: row.date,
        summary: row.summary,
        executive_summary: row.executive_summary,
        key_points: serde_json::from_str(&row.key_points).unwrap_or_default(),
        participants: serde_json::from_str(&row.participants).unwrap_or_default(),
        duration: row.duration,
        source: row.source,
    })
}

fn get_action_items(conn: &Connection, meeting_id: &str) -> Result<Vec<ActionItem>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT item_index, description, owner, due, priority, completed
         FROM action_items WHERE meeting_id = ?1 ORDER BY item_index",
    )?;

    let rows = stmt.query_map(params![meeting_id], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i32>(5)?,
        ))
    })?;

    let mut items = Vec::new();
    for row in rows {
        let (item_index, description, owner, due, priority, completed) = row?;
        items.push(ActionItem {
            id: item_index.to_string(),
            text: description,
            owner,
            due,
            priority: Priority::normalize(&priority),
            completed: completed != 0,
        });
    }
    Ok(items)
}
