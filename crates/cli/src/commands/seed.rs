//! Demo data seeding.
//!
//! Creates a developer, a teacher with one class, and three enrolled
//! students, with an initial progress entry for the first student. Existing
//! usernames are left untouched, so reseeding is safe.

use sqlx::PgPool;

use hifz_core::{Position, Role, Username};
use hifz_server::auth::password;
use hifz_server::db::{ClassRepository, ProgressRepository, UserRepository};
use hifz_server::models::User;

use super::{CommandError, database_url};

const DEMO_USERS: &[(&str, &str, Role)] = &[
    ("developer1", "Site Developer", Role::Developer),
    ("teacher1", "Ustadh Kareem", Role::Teacher),
    ("student1", "Bilal Yusuf", Role::Student),
    ("student2", "Maryam Noor", Role::Student),
    ("student3", "Zayd Harun", Role::Student),
];

const DEMO_CLASS: &str = "Morning Hifz";

/// Seed the database with demo data.
///
/// # Errors
///
/// Returns `CommandError` on an invalid password or a database failure.
pub async fn run(demo_password: &str) -> Result<(), CommandError> {
    password::validate_password(demo_password).map_err(CommandError::InvalidPassword)?;

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let password_hash =
        password::hash_password(demo_password).map_err(|_| CommandError::Hashing)?;

    let users = UserRepository::new(&pool);
    let mut created: Vec<User> = Vec::new();

    for &(username, name, role) in DEMO_USERS {
        let username = Username::parse(username)
            .map_err(|e| CommandError::InvalidUsername(e.to_string()))?;

        if let Some(existing) = users.get_by_username(&username).await? {
            tracing::info!("Skipping existing user: {}", existing.username);
            created.push(existing);
            continue;
        }

        let user = users
            .create(&username, name, None, role, &password_hash)
            .await?;
        tracing::info!("Created {} {}", user.role, user.username);
        created.push(user);
    }

    let teacher = find_role(&created, Role::Teacher)?;
    let students: Vec<&User> = created.iter().filter(|u| u.role == Role::Student).collect();

    let classes = ClassRepository::new(&pool);
    let class = match classes
        .list_by_teacher(teacher.id)
        .await?
        .into_iter()
        .find(|c| c.name == DEMO_CLASS)
    {
        Some(class) => {
            tracing::info!("Skipping existing class: {}", class.name);
            class
        }
        None => {
            let class = classes.create(DEMO_CLASS, teacher.id).await?;
            tracing::info!("Created class {}", class.name);
            class
        }
    };

    for student in &students {
        classes.add_student(class.id, student.id).await?;
    }
    tracing::info!("Enrolled {} students in {}", students.len(), class.name);

    if let Some(first) = students.first() {
        // Surat al-Baqarah 2:25, page 4
        let position = Position::new(2, 25, 4).map_err(|e| CommandError::Seed(e.to_string()))?;
        ProgressRepository::new(&pool)
            .upsert(first.id, class.id, position, teacher.id)
            .await?;
        tracing::info!("Recorded initial progress for {}", first.username);
    }

    tracing::info!("Seed complete. All demo accounts use the provided password.");
    Ok(())
}

fn find_role(users: &[User], role: Role) -> Result<&User, CommandError> {
    users
        .iter()
        .find(|u| u.role == role)
        .ok_or_else(|| CommandError::Seed(format!("no {role} among seeded users")))
}
