//! Deterministic seed dataset for development and tests.
//!
//! Mirrors the counts the API's example scenarios rely on: 4 categories,
//! 4 users, 13 reviews (11 of them in `social deduction`, review 9 holding
//! 10 votes), 6 comments.

use sqlx::SqlitePool;

use crate::error::Result;

const CATEGORIES: &[(&str, &str)] = &[
    ("euro game", "Abstact games that involve little luck"),
    (
        "social deduction",
        "Players attempt to uncover each other's hidden role",
    ),
    ("dexterity", "Games involving physical skill"),
    ("children's games", "Games suitable for children"),
];

const USERS: &[(&str, &str, &str)] = &[
    (
        "mallionaire",
        "haz",
        "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg",
    ),
    (
        "philippaclaire9",
        "philippa",
        "https://avatars2.githubusercontent.com/u/24604688?s=460&v=4",
    ),
    (
        "bainesface",
        "sarah",
        "https://avatars2.githubusercontent.com/u/24394918?s=400&v=4",
    ),
    (
        "dav3rid",
        "dave",
        "https://avatars2.githubusercontent.com/u/24533717?s=460&v=4",
    ),
];

/// (id, title, designer, owner, body, category, created_at, votes)
#[allow(clippy::type_complexity)]
const REVIEWS: &[(i64, &str, &str, &str, &str, &str, &str, i64)] = &[
    (
        1,
        "Agricola",
        "Uwe Rosenberg",
        "mallionaire",
        "Farmyard fun!",
        "euro game",
        "2021-01-18T10:00:20.514Z",
        1,
    ),
    (
        2,
        "Jenga",
        "Leslie Scott",
        "philippaclaire9",
        "Fiddly fun for all the family",
        "dexterity",
        "2021-01-18T10:01:41.251Z",
        5,
    ),
    (
        3,
        "Ultimate Werewolf",
        "Akihisa Okui",
        "bainesface",
        "We couldn't find the werewolf!",
        "social deduction",
        "2021-01-18T10:01:41.295Z",
        5,
    ),
    (
        4,
        "Dolor reprehenderit",
        "Gamey McGameface",
        "mallionaire",
        "Consequat velit occaecat voluptate do.",
        "social deduction",
        "2021-01-22T11:35:50.936Z",
        7,
    ),
    (
        5,
        "Proident tempor et.",
        "Seymour Buttz",
        "mallionaire",
        "Labore occaecat sunt qui commodo anim.",
        "social deduction",
        "2021-01-07T09:06:08.077Z",
        5,
    ),
    (
        6,
        "Occaecat consequat officia in quis commodo.",
        "Ollie Tabooger",
        "mallionaire",
        "Fugiat fugiat enim officia laborum quis.",
        "social deduction",
        "2020-09-13T14:19:28.077Z",
        8,
    ),
    (
        7,
        "Mollit elit qui incididunt veniam occaecat cupidatat",
        "Avery Wunzboogerz",
        "mallionaire",
        "Consectetur incididunt aliquip sunt officia.",
        "social deduction",
        "2021-01-25T11:16:54.963Z",
        9,
    ),
    (
        8,
        "One Night Ultimate Werewolf",
        "Akihisa Okui",
        "mallionaire",
        "We couldn't find the werewolf!",
        "social deduction",
        "2021-01-05T11:16:54.963Z",
        5,
    ),
    (
        9,
        "A truly Quacking Game; Quacks of Quedlinburg",
        "Wolfgang Warsch",
        "mallionaire",
        "Ever wish you could try your hand at mixing potions?",
        "social deduction",
        "2021-01-07T09:06:08.077Z",
        10,
    ),
    (
        10,
        "Build you own tour de Yorkshire",
        "Asger Harding Granerud",
        "mallionaire",
        "Cold rain pours on the faces of your team of cyclists.",
        "social deduction",
        "2021-01-07T09:06:08.077Z",
        10,
    ),
    (
        11,
        "That's just what an evil person would say!",
        "Fiona Lohoar",
        "mallionaire",
        "If you've ever wanted to accuse your siblings of being part of a plot to murder everyone, then this is the game for you.",
        "social deduction",
        "2021-01-07T09:06:08.077Z",
        8,
    ),
    (
        12,
        "Scythe; you're gonna need a bigger table!",
        "Jamey Stegmaier",
        "mallionaire",
        "Spend 30 minutes just setting up all of the boards, then prepare for a tense game.",
        "social deduction",
        "2021-01-22T10:37:04.839Z",
        100,
    ),
    (
        13,
        "Settlers of Catan: Don't Settle For Less",
        "Klaus Teuber",
        "mallionaire",
        "You have stumbled across an uncharted island rich in natural resources.",
        "social deduction",
        "1970-01-10T02:08:38.400Z",
        16,
    ),
];

/// (id, body, votes, author, review_id, created_at)
const COMMENTS: &[(i64, &str, i64, &str, i64, &str)] = &[
    (
        1,
        "I loved this game too!",
        16,
        "bainesface",
        2,
        "2017-11-22T12:43:33.389Z",
    ),
    (
        2,
        "My dog loved this game too!",
        13,
        "mallionaire",
        3,
        "2021-01-18T10:09:05.410Z",
    ),
    (
        3,
        "I didn't know dogs could play games",
        10,
        "philippaclaire9",
        3,
        "2021-01-18T10:09:48.110Z",
    ),
    (
        4,
        "EPIC board game!",
        16,
        "bainesface",
        2,
        "2017-11-22T12:36:03.389Z",
    ),
    (
        5,
        "Now this is a story all about how, board games turned my life upside down",
        13,
        "mallionaire",
        2,
        "2021-01-18T10:24:05.410Z",
    ),
    (
        6,
        "Not sure about dogs, but my cat likes to get involved with board games, they always offer the best advice.",
        10,
        "philippaclaire9",
        4,
        "2021-03-27T19:49:48.110Z",
    ),
];

/// Wipes all rows and loads the fixture dataset.
///
/// # Errors
///
/// Returns any insertion failure.
pub async fn seed(pool: &SqlitePool) -> Result<()> {
    // Child tables first; FK enforcement is on.
    sqlx::query("DELETE FROM comments").execute(pool).await?;
    sqlx::query("DELETE FROM reviews").execute(pool).await?;
    sqlx::query("DELETE FROM users").execute(pool).await?;
    sqlx::query("DELETE FROM categories").execute(pool).await?;

    for (slug, description) in CATEGORIES {
        sqlx::query("INSERT INTO categories (slug, description) VALUES (?, ?)")
            .bind(slug)
            .bind(description)
            .execute(pool)
            .await?;
    }

    for (username, name, avatar_url) in USERS {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES (?, ?, ?)")
            .bind(username)
            .bind(name)
            .bind(avatar_url)
            .execute(pool)
            .await?;
    }

    for (id, title, designer, owner, body, category, created_at, votes) in REVIEWS {
        sqlx::query(
            "INSERT INTO reviews \
                (review_id, title, review_body, designer, votes, category, owner, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(title)
        .bind(body)
        .bind(designer)
        .bind(votes)
        .bind(category)
        .bind(owner)
        .bind(created_at)
        .execute(pool)
        .await?;
    }

    for (id, body, votes, author, review_id, created_at) in COMMENTS {
        sqlx::query(
            "INSERT INTO comments (comment_id, body, votes, author, review_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(body)
        .bind(votes)
        .bind(author)
        .bind(review_id)
        .bind(created_at)
        .execute(pool)
        .await?;
    }

    tracing::debug!(
        categories = CATEGORIES.len(),
        users = USERS.len(),
        reviews = REVIEWS.len(),
        comments = COMMENTS.len(),
        "seeded fixture dataset"
    );
    Ok(())
}
