use shelfkeep::{Bookstore, config::BookstoreConfig, prelude::*, seed, telemetry};

async fn open() -> Bookstore {
    telemetry::init_tracing("warn");
    let config = BookstoreConfig::from_json_str(
        r#"{ "log_level": "warn", "hashing": { "memory_kib": 8, "iterations": 1, "parallelism": 1 } }"#,
    )
    .unwrap();
    Bookstore::open(&config).await.unwrap()
}

#[tokio::test]
async fn seeded_catalog_lists_books_in_order() {
    let bookstore = open().await;

    let books = bookstore.catalog().list().await.unwrap();

    assert_eq!(books, seed::default_books());
    assert_eq!(books[0].title, "The Pragmatic Programmer");
}

#[tokio::test]
async fn add_get_update_remove() {
    let bookstore = open().await;
    let catalog = bookstore.catalog();

    catalog.add(Book::new(6, "Working Effectively with Legacy Code")).unwrap();
    assert_eq!(catalog.get(6).await.unwrap().author, None);

    catalog
        .update(6, BookChanges {
            title: "Working Effectively with Legacy Code".into(),
            author: Some("Michael Feathers".into()),
        })
        .await
        .unwrap();
    assert_eq!(catalog.get(6).await.unwrap().author.as_deref(), Some("Michael Feathers"));

    catalog.remove(6);
    assert!(catalog.get(6).await.unwrap_err().is_not_found());
    assert_eq!(catalog.list().await.unwrap().len(), seed::default_books().len());
}

#[tokio::test]
async fn update_keeps_position_and_count() {
    let bookstore = open().await;
    let catalog = bookstore.catalog();

    catalog
        .update(3, BookChanges { title: "YDKJS".into(), author: None })
        .await
        .unwrap();

    let books = catalog.list().await.unwrap();
    assert_eq!(books.len(), 5);
    assert_eq!(books[2], Book::new(3, "YDKJS"));
}

#[tokio::test]
async fn duplicate_ids_resolve_to_the_first_book() {
    let bookstore = open().await;
    let catalog = bookstore.catalog();

    catalog.add(Book::new(1, "Shadow copy")).unwrap();

    assert_eq!(catalog.get(1).await.unwrap().title, "The Pragmatic Programmer");
    catalog.remove(1);
    assert_eq!(catalog.get(1).await.unwrap().title, "Shadow copy");
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let bookstore = open().await;

    let err = bookstore.catalog().add(Book::new(9, " ")).unwrap_err();

    assert!(matches!(err, CatalogError::MissingTitle));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn shutdown_succeeds() {
    let bookstore = open().await;

    bookstore.shutdown().await.unwrap();
}
