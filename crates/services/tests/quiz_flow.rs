mod support;

use quiz_core::ScoreBand;
use quiz_core::time::fixed_now;
use services::{Clock, LoadError, QuizServices, SessionStatus};

#[tokio::test]
async fn library_refresh_then_full_session() {
    let url = support::serve("200 OK", support::FEED).await;
    let services = QuizServices::in_memory(Clock::fixed(fixed_now()))
        .with_http_client(support::client());

    let mut library = services.library();
    let categories = library.refresh(url.clone()).await.unwrap();
    assert_eq!(categories.len(), 2);

    let maths = library.categories()[0].clone();
    assert_eq!(library.find(maths.id()).map(|c| c.title()), Some("Mathematics"));

    let mut session = services.start_session(&maths);
    session.select_option(0).unwrap();
    session.submit().unwrap();
    assert_eq!(session.acknowledge().unwrap(), SessionStatus::InProgress);

    session.select_option(1).unwrap();
    let answer = session.submit().unwrap();
    assert!(!answer.is_correct());
    assert_eq!(session.reveal().unwrap().correct_option(), "9");
    assert_eq!(session.acknowledge().unwrap(), SessionStatus::Finished);

    let result = session.result().unwrap();
    assert_eq!((result.score, result.total), (1, 2));
    assert_eq!(result.band(), ScoreBand::Nice);

    let remembered = services.source_settings().last_known_source().await.unwrap();
    assert_eq!(remembered.as_str(), url);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_categories() {
    let good = support::serve("200 OK", support::FEED).await;
    let bad = support::serve("200 OK", "not json").await;
    let services = QuizServices::in_memory(Clock::fixed(fixed_now()))
        .with_http_client(support::client());
    let mut library = services.library();

    library.refresh(good.clone()).await.unwrap();
    let before: Vec<_> = library.categories().iter().map(|c| c.id()).collect();

    let err = library.refresh(bad).await.unwrap_err();
    assert!(matches!(err, LoadError::DecodeFailed(_)));
    assert!(library.last_error().is_some());

    let after: Vec<_> = library.categories().iter().map(|c| c.id()).collect();
    assert_eq!(before, after);

    let remembered = services.source_settings().last_known_source().await.unwrap();
    assert_eq!(remembered.as_str(), good);
}

#[tokio::test]
async fn newer_refresh_supersedes_older_one() {
    let stalled = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let stalled_url = format!("http://{}/q.json", stalled.local_addr().unwrap());
    let good = support::serve("200 OK", support::FEED).await;

    let services = QuizServices::in_memory(Clock::fixed(fixed_now()))
        .with_http_client(support::client());
    let mut library = services.library();

    library.begin_refresh(stalled_url);
    assert!(library.is_refreshing());
    library.begin_refresh(good);

    let categories = library.finish_refresh().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert!(!library.is_refreshing());
    drop(stalled);
}
