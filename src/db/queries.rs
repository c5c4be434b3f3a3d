use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Appointment, AppointmentStatus, Role, User};

const APPOINTMENT_COLUMNS: &str = "id, name, phone, service, datetime, status, created_at";
const USER_COLUMNS: &str = "id, email, password_hash, role, created_at";

/// Fixed-width UTC text, so lexical order is chronological order.
fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_ts(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid stored timestamp: {raw}"))
}

// ── Appointments ──

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO appointments (id, name, phone, service, datetime, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            appt.id,
            appt.name,
            appt.phone,
            appt.service,
            format_ts(&appt.datetime),
            appt.status.as_str(),
            format_ts(&appt.created_at),
        ],
    )?;
    Ok(())
}

pub fn list_appointments(conn: &Connection) -> anyhow::Result<Vec<Appointment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY datetime ASC, created_at ASC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_appointment_row(row)))?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn get_appointment(conn: &Connection, id: &str) -> anyhow::Result<Option<Appointment>> {
    let result = conn
        .query_row(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
            params![id],
            |row| Ok(parse_appointment_row(row)),
        )
        .optional()?;

    result.transpose()
}

/// Overwrites every mutable column. Returns false when the row is gone.
pub fn save_appointment(conn: &Connection, appt: &Appointment) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE appointments SET name = ?1, phone = ?2, service = ?3, datetime = ?4, status = ?5
         WHERE id = ?6",
        params![
            appt.name,
            appt.phone,
            appt.service,
            format_ts(&appt.datetime),
            appt.status.as_str(),
            appt.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_appointment(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_appointment_row(row: &rusqlite::Row) -> anyhow::Result<Appointment> {
    let datetime_str: String = row.get(4)?;
    let status_str: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;

    Ok(Appointment {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        service: row.get(3)?,
        datetime: parse_ts(&datetime_str)?,
        status: AppointmentStatus::parse(&status_str),
        created_at: parse_ts(&created_at_str)?,
    })
}

// ── Users ──

pub fn insert_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, email, password_hash, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user.id,
            user.email,
            user.password_hash,
            user.role.as_str(),
            format_ts(&user.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> anyhow::Result<Option<User>> {
    let result = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            params![email],
            |row| Ok(parse_user_row(row)),
        )
        .optional()?;

    result.transpose()
}

pub fn get_user(conn: &Connection, id: &str) -> anyhow::Result<Option<User>> {
    let result = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            |row| Ok(parse_user_row(row)),
        )
        .optional()?;

    result.transpose()
}

fn parse_user_row(row: &rusqlite::Row) -> anyhow::Result<User> {
    let role_str: String = row.get(3)?;
    let created_at_str: String = row.get(4)?;

    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        role: Role::parse(&role_str).unwrap_or(Role::User),
        created_at: parse_ts(&created_at_str)?,
    })
}
