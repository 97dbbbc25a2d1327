use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase};

use blogly_core::domain::{
    DEFAULT_PROFILE_PIC, Id, NewPost, NewTag, NewUser, Post, PostChanges, TagChanges, User,
    UserChanges,
};
use blogly_core::error::RepoError;
use blogly_core::ports::{BaseRepository, UserRepository};
use blogly_core::{BlogService, DomainError};

use crate::blog_service;
use crate::database::entity::post;
use crate::database::{
    Database, DatabaseConfig, SqlPostRepository, SqlTagRepository, SqlUserRepository,
};

async fn setup() -> (Database, BlogService) {
    let db = Database::connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    db.migrate().await.unwrap();
    let service = blog_service(&db);
    (db, service)
}

fn minute(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(n)
}

async fn author(service: &BlogService) -> User {
    service
        .create_user(NewUser::new("First", "Last"))
        .await
        .unwrap()
}

fn titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn test_find_post_by_id() {
    let posted_at = minute(0);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: 42,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            posted_by: 7,
            posted_at,
        }]])
        .into_connection();

    let repo = SqlPostRepository::new(Arc::new(db));

    let result: Option<Post> = repo.find_by_id(42).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 42);
    assert_eq!(post.posted_by, 7);
    assert_eq!(post.posted_at, posted_at);
}

#[tokio::test]
async fn user_without_picture_gets_placeholder() {
    let (_db, service) = setup().await;

    let user = author(&service).await;
    assert_eq!(user.profile_pic, DEFAULT_PROFILE_PIC);

    let stored = service.get_user(user.id).await.unwrap();
    assert_eq!(stored, user);
}

#[tokio::test]
async fn duplicate_tag_name_is_rejected() {
    let (_db, service) = setup().await;

    service.create_tag(NewTag::new("Tag")).await.unwrap();
    let err = service.create_tag(NewTag::new("Tag")).await.unwrap_err();

    assert!(matches!(err, DomainError::Duplicate(_)), "{err:?}");
    assert_eq!(service.list_tags().await.unwrap().len(), 1);
}

#[tokio::test]
async fn renaming_onto_existing_tag_is_rejected() {
    let (_db, service) = setup().await;
    service.create_tag(NewTag::new("rust")).await.unwrap();
    let other = service.create_tag(NewTag::new("python")).await.unwrap();

    let err = service
        .update_tag(other.id, TagChanges::rename("rust"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Duplicate(_)), "{err:?}");
    assert_eq!(service.get_tag(other.id).await.unwrap().name, "python");
}

#[tokio::test]
async fn recent_posts_are_the_five_newest() {
    let (_db, service) = setup().await;
    let user = author(&service).await;

    let names = [
        "Oldest Post",
        "Older Post",
        "Middle Post",
        "New Post",
        "Newer Post",
        "Newest Post",
    ];
    for (i, title) in names.iter().enumerate() {
        service
            .create_post(
                NewPost::new(*title, "body", user.id).posted_at(minute(i as i64)),
                vec![],
            )
            .await
            .unwrap();
    }

    let recent = service.list_recent_posts(5).await.unwrap();

    assert_eq!(
        titles(&recent),
        ["Newest Post", "Newer Post", "New Post", "Middle Post", "Older Post"]
    );
}

#[tokio::test]
async fn equal_timestamps_keep_insertion_order() {
    let (_db, service) = setup().await;
    let user = author(&service).await;

    for title in ["a", "b", "c"] {
        service
            .create_post(NewPost::new(title, "body", user.id).posted_at(minute(0)), vec![])
            .await
            .unwrap();
    }

    let recent = service.list_recent_posts(2).await.unwrap();
    assert_eq!(titles(&recent), ["a", "b"]);
}

#[tokio::test]
async fn homepage_pairs_posts_with_their_tags() {
    let (_db, service) = setup().await;
    let user = author(&service).await;

    let mut tags = Vec::new();
    for i in 1..=6 {
        tags.push(service.create_tag(NewTag::new(format!("Tag{i}"))).await.unwrap().id);
    }

    let links: [(&str, Vec<i32>); 6] = [
        ("Oldest Post", vec![tags[0], tags[1]]),
        ("Older Post", vec![tags[2], tags[3]]),
        ("Middle Post", vec![tags[4]]),
        ("New Post", vec![tags[5], tags[4], tags[3]]),
        ("Newer Post", vec![tags[2]]),
        ("Newest Post", vec![tags[1]]),
    ];
    for (i, (title, tag_ids)) in links.into_iter().enumerate() {
        service
            .create_post(
                NewPost::new(title, "body", user.id).posted_at(minute(i as i64)),
                tag_ids,
            )
            .await
            .unwrap();
    }

    let home = service.recent_posts_with_tags(5).await.unwrap();

    assert_eq!(home.len(), 5);
    assert_eq!(home[0].post.title, "Newest Post");
    let tag_names =
        |i: usize| -> Vec<String> { home[i].tags.iter().map(|t| t.name.clone()).collect() };
    assert_eq!(tag_names(0), ["Tag2"]);
    assert_eq!(tag_names(2), ["Tag4", "Tag5", "Tag6"]);
    assert!(home.iter().all(|p| p.post.title != "Oldest Post"));
}

#[tokio::test]
async fn deleting_user_removes_posts_and_links() {
    let (_db, service) = setup().await;
    let user = author(&service).await;
    let tag = service.create_tag(NewTag::new("keep")).await.unwrap();

    let first = service
        .create_post(NewPost::new("one", "body", user.id), vec![tag.id])
        .await
        .unwrap();
    let second = service
        .create_post(NewPost::new("two", "body", user.id), vec![tag.id])
        .await
        .unwrap();

    service.delete_user(user.id).await.unwrap();

    for id in [first.id, second.id] {
        assert!(matches!(
            service.get_post(id).await,
            Err(DomainError::NotFound { entity_type: "post", .. })
        ));
    }
    assert_eq!(service.get_tag(tag.id).await.unwrap().name, "keep");
    assert!(service.list_posts_for_tag(tag.id).await.unwrap().is_empty());
    assert!(matches!(
        service.delete_user(user.id).await,
        Err(DomainError::NotFound { entity_type: "user", .. })
    ));
}

#[tokio::test]
async fn deleting_tag_keeps_posts_and_deleting_post_keeps_tags() {
    let (_db, service) = setup().await;
    let user = author(&service).await;
    let doomed = service.create_tag(NewTag::new("doomed")).await.unwrap();
    let kept = service.create_tag(NewTag::new("kept")).await.unwrap();
    let post = service
        .create_post(NewPost::new("title", "body", user.id), vec![doomed.id, kept.id])
        .await
        .unwrap();

    service.delete_tag(doomed.id).await.unwrap();

    let remaining = service.list_tags_for_post(post.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);

    service.delete_post(post.id).await.unwrap();

    assert!(service.list_posts_for_tag(kept.id).await.unwrap().is_empty());
    assert_eq!(service.get_tag(kept.id).await.unwrap().name, "kept");
}

#[tokio::test]
async fn editing_title_leaves_content_and_tags() {
    let (_db, service) = setup().await;
    let user = author(&service).await;
    let tag = service.create_tag(NewTag::new("t")).await.unwrap();
    let post = service
        .create_post(NewPost::new("Original", "Body", user.id), vec![tag.id])
        .await
        .unwrap();

    let edited = service
        .update_post(post.id, PostChanges::title("Edited"), None)
        .await
        .unwrap();

    assert_eq!(edited.title, "Edited");
    assert_eq!(edited.content, "Body");
    assert_eq!(edited.posted_at, post.posted_at);
    let tags = service.list_tags_for_post(post.id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, tag.id);
}

#[tokio::test]
async fn edit_post_scenario() {
    let (_db, service) = setup().await;
    let user = author(&service).await;

    let post = service
        .create_post(NewPost::new("Edit Me", "I am not edited", user.id), vec![])
        .await
        .unwrap();
    assert_eq!(service.get_post(post.id).await.unwrap().content, "I am not edited");

    service
        .update_post(post.id, PostChanges::content("I am edited"), None)
        .await
        .unwrap();

    let stored = service.get_post(post.id).await.unwrap();
    assert_eq!(stored.content, "I am edited");
    assert_eq!(stored.title, "Edit Me");
}

#[tokio::test]
async fn post_tag_set_is_replaced_not_appended() {
    let (_db, service) = setup().await;
    let user = author(&service).await;
    let a = service.create_tag(NewTag::new("a")).await.unwrap();
    let b = service.create_tag(NewTag::new("b")).await.unwrap();
    let c = service.create_tag(NewTag::new("c")).await.unwrap();
    let post = service
        .create_post(NewPost::new("title", "body", user.id), vec![a.id, b.id])
        .await
        .unwrap();

    service
        .update_post(post.id, PostChanges::default(), Some(vec![b.id, c.id, c.id]))
        .await
        .unwrap();

    let names: Vec<String> = service
        .list_tags_for_post(post.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["b", "c"]);

    service
        .update_post(post.id, PostChanges::default(), Some(vec![]))
        .await
        .unwrap();
    assert!(service.list_tags_for_post(post.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn tag_post_set_is_replaced() {
    let (_db, service) = setup().await;
    let user = author(&service).await;
    let tag = service.create_tag(NewTag::new("Edit_Me")).await.unwrap();

    let mut posts = Vec::new();
    for (i, title) in ["p1", "p2", "p3"].iter().enumerate() {
        let post = service
            .create_post(
                NewPost::new(*title, "body", user.id).posted_at(minute(i as i64)),
                vec![],
            )
            .await
            .unwrap();
        posts.push(post.id);
    }

    service
        .update_tag(tag.id, TagChanges::default(), Some(vec![posts[0], posts[1]]))
        .await
        .unwrap();
    let renamed = service
        .update_tag(tag.id, TagChanges::rename("Edited"), Some(vec![posts[1], posts[2]]))
        .await
        .unwrap();

    assert_eq!(renamed.name, "Edited");
    let linked = service.list_posts_for_tag(tag.id).await.unwrap();
    assert_eq!(titles(&linked), ["p3", "p2"]);
}

#[tokio::test]
async fn unknown_tag_rolls_back_the_whole_edit() {
    let (_db, service) = setup().await;
    let user = author(&service).await;
    let post = service
        .create_post(NewPost::new("Before", "body", user.id), vec![])
        .await
        .unwrap();

    let err = service
        .update_post(post.id, PostChanges::title("After"), Some(vec![999]))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Referential(_)), "{err:?}");
    assert_eq!(service.get_post(post.id).await.unwrap().title, "Before");
}

#[tokio::test]
async fn post_needs_an_existing_author() {
    let (_db, service) = setup().await;

    let err = service
        .create_post(NewPost::new("title", "body", 12345), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)), "{err:?}");

    let user = author(&service).await;
    let err = service
        .create_post(NewPost::new("title", "body", user.id), vec![404])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Referential(_)), "{err:?}");
    assert!(service.list_posts_for_user(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn user_update_only_touches_supplied_fields() {
    let (_db, service) = setup().await;
    let user = author(&service).await;

    let edited = service
        .update_user(
            user.id,
            UserChanges {
                first_name: Some("EditedName".into()),
                last_name: Some("".into()),
                profile_pic: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(edited.first_name, "EditedName");
    assert_eq!(edited.last_name, "Last");
    assert_eq!(edited.profile_pic, DEFAULT_PROFILE_PIC);

    let unchanged = service
        .update_user(user.id, UserChanges::default())
        .await
        .unwrap();
    assert_eq!(unchanged, edited);

    assert!(matches!(
        service.update_user(999, UserChanges::default()).await,
        Err(DomainError::NotFound { entity_type: "user", id: 999 })
    ));
}

#[tokio::test]
async fn listings_follow_their_orders() {
    let (_db, service) = setup().await;
    let first = author(&service).await;
    let second = service
        .create_user(
            NewUser::new("Ada", "Lovelace").with_profile_pic("https://example.com/ada.png"),
        )
        .await
        .unwrap();

    let users = service.list_users().await.unwrap();
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), [first.id, second.id]);
    assert_eq!(users[1].profile_pic, "https://example.com/ada.png");

    service.create_tag(NewTag::new("zeta")).await.unwrap();
    service.create_tag(NewTag::new("alpha")).await.unwrap();
    let tags = service.list_tags().await.unwrap();
    let names: Vec<String> = tags.into_iter().map(|t| t.name).collect();
    assert_eq!(names, ["alpha", "zeta"]);

    service
        .create_post(NewPost::new("old", "body", second.id).posted_at(minute(0)), vec![])
        .await
        .unwrap();
    service
        .create_post(NewPost::new("new", "body", second.id).posted_at(minute(1)), vec![])
        .await
        .unwrap();
    service
        .create_post(NewPost::new("other", "body", first.id), vec![])
        .await
        .unwrap();

    let own = service.list_posts_for_user(second.id).await.unwrap();
    assert_eq!(titles(&own), ["new", "old"]);
    assert!(matches!(
        service.list_posts_for_user(999).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn unknown_post_rolls_back_the_tag_edit() {
    let (_db, service) = setup().await;
    let user = author(&service).await;
    let post = service
        .create_post(NewPost::new("title", "body", user.id), vec![])
        .await
        .unwrap();
    let tag = service.create_tag(NewTag::new("orig")).await.unwrap();
    service
        .update_tag(tag.id, TagChanges::default(), Some(vec![post.id]))
        .await
        .unwrap();

    let err = service
        .update_tag(tag.id, TagChanges::rename("renamed"), Some(vec![post.id, 999]))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Referential(_)), "{err:?}");
    assert_eq!(service.get_tag(tag.id).await.unwrap().name, "orig");
    let linked = service.list_posts_for_tag(tag.id).await.unwrap();
    assert_eq!(titles(&linked), ["title"]);
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let (_db, service) = setup().await;

    assert!(matches!(
        service.update_tag(999, TagChanges::rename("x"), None).await,
        Err(DomainError::NotFound { entity_type: "tag", id: 999 })
    ));
    assert!(matches!(
        service.update_post(999, PostChanges::title("x"), None).await,
        Err(DomainError::NotFound { entity_type: "post", id: 999 })
    ));
    assert!(matches!(
        service.delete_post(999).await,
        Err(DomainError::NotFound { entity_type: "post", id: 999 })
    ));
    assert!(matches!(
        service.delete_tag(999).await,
        Err(DomainError::NotFound { entity_type: "tag", id: 999 })
    ));
    assert!(matches!(
        service.list_tags_for_post(999).await,
        Err(DomainError::NotFound { entity_type: "post", id: 999 })
    ));
    assert!(matches!(
        service.list_posts_for_tag(999).await,
        Err(DomainError::NotFound { entity_type: "tag", id: 999 })
    ));
}

/// Reports the user once, then deletes it before anyone else can look again.
struct VanishingAuthor {
    inner: SqlUserRepository,
    gone: AtomicBool,
}

#[async_trait]
impl BaseRepository<User> for VanishingAuthor {
    async fn find_by_id(&self, id: Id) -> Result<Option<User>, RepoError> {
        let found: Option<User> = self.inner.find_by_id(id).await?;
        if found.is_some() && !self.gone.swap(true, Ordering::SeqCst) {
            BaseRepository::<User>::delete(&self.inner, id).await?;
        }
        Ok(found)
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        self.inner.find_all().await
    }

    async fn delete(&self, id: Id) -> Result<(), RepoError> {
        BaseRepository::<User>::delete(&self.inner, id).await
    }
}

#[async_trait]
impl UserRepository for VanishingAuthor {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        self.inner.create(user).await
    }

    async fn update(&self, id: Id, changes: UserChanges) -> Result<User, RepoError> {
        self.inner.update(id, changes).await
    }
}

#[tokio::test]
async fn author_deleted_mid_create_is_a_validation_error() {
    let (db, plain) = setup().await;
    let user = author(&plain).await;

    let service = BlogService::new(
        Arc::new(VanishingAuthor {
            inner: SqlUserRepository::new(db.shared()),
            gone: AtomicBool::new(false),
        }),
        Arc::new(SqlPostRepository::new(db.shared())),
        Arc::new(SqlTagRepository::new(db.shared())),
    );

    let err = service
        .create_post(NewPost::new("title", "body", user.id), vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)), "{err:?}");
    assert!(plain.list_recent_posts(5).await.unwrap().is_empty());
}
