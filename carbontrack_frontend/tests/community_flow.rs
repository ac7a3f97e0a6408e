mod support;

use std::path::PathBuf;

use carbontrack_frontend::app::feedback::{DraftError, RemoteFailure, ALREADY_LIKED};
use carbontrack_frontend::app::state::ViewState;
use carbontrack_frontend::models::Post;
use carbontrack_frontend::router::Route;
use carbontrack_frontend::session::{MemorySessionStore, SessionStore, StoredSession};
use carbontrack_frontend::CarbonTrackApp;

use pretty_assertions::assert_eq;

use support::{feed, post, quiet, settle, signed_in_store, start, Call, FakeApi};

fn community(app: &mut CarbonTrackApp) -> &mut carbontrack_frontend::app::state::CommunityState {
    match app.view_mut() {
        ViewState::Community(state) => state,
        _ => panic!("community page is not mounted"),
    }
}

fn mounted() -> (std::sync::Arc<FakeApi>, MemorySessionStore, CarbonTrackApp) {
    let api = FakeApi::new(feed());
    let store = signed_in_store();
    let mut app = start(&api, &store, Route::Community);
    settle(&mut app, 2);
    (api, store, app)
}

#[test]
fn redirects_to_auth_without_session() {
    let api = FakeApi::new(feed());
    let store = MemorySessionStore::new();
    let mut app = start(&api, &store, Route::Community);

    assert_eq!(app.route(), &Route::Auth);
    assert!(app.auth().is_some());
    assert!(api.calls().is_empty());
    assert!(quiet(&mut app));
}

#[test]
fn half_stored_session_counts_as_signed_out() {
    let api = FakeApi::new(feed());
    let store = MemorySessionStore::with_record(StoredSession {
        user_id: Some("u1".into()),
        token: None,
    });
    let app = start(&api, &store, Route::Community);
    assert_eq!(app.route(), &Route::Auth);
    assert!(api.calls().is_empty());
}

#[test]
fn mount_fetches_feed_and_profile() {
    let (api, _store, app) = mounted();
    let state = app.community().unwrap();

    assert_eq!(state.posts, feed());
    assert!(!state.posts_loading);
    assert_eq!(state.profile.name, "Ada");
    assert_eq!(state.error, None);
    assert_eq!(api.count(|c| *c == Call::ListPosts), 1);
    assert_eq!(api.count(|c| *c == Call::Profile("u1".into())), 1);
}

#[test]
fn profile_failure_does_not_block_feed() {
    let api = FakeApi::new(feed());
    api.fail("profile");
    let store = signed_in_store();
    let mut app = start(&api, &store, Route::Community);
    settle(&mut app, 2);

    let state = app.community().unwrap();
    assert_eq!(state.posts.len(), 3);
    assert_eq!(state.profile.name, "");
    assert_eq!(state.error, None);
}

#[test]
fn feed_failure_shows_generic_message() {
    let api = FakeApi::new(feed());
    api.fail("list_posts");
    let store = signed_in_store();
    let mut app = start(&api, &store, Route::Community);
    settle(&mut app, 2);

    let state = app.community().unwrap();
    assert!(state.posts.is_empty());
    assert_eq!(state.error, Some(RemoteFailure::FetchPosts.to_string()));
}

#[test]
fn blank_title_or_caption_never_reaches_server() {
    let (api, _store, mut app) = mounted();
    let before = api.calls().len();

    for (title, caption) in [("   ", "caption"), ("title", " \n "), ("", "")] {
        {
            let state = community(&mut app);
            state.error = None;
            state.new_post.title = title.into();
            state.new_post.caption = caption.into();
        }
        app.submit_post();
        assert_eq!(
            app.community().unwrap().error,
            Some(DraftError::EmptyPost.to_string())
        );
    }

    assert!(quiet(&mut app));
    assert_eq!(api.calls().len(), before);
}

#[test]
fn created_post_replaces_the_whole_feed() {
    let (api, _store, mut app) = mounted();
    {
        let state = community(&mut app);
        state.new_post.title = "Train commute".into();
        state.new_post.caption = "Swapped the car for the train".into();
    }
    app.submit_post();
    assert!(app.community().unwrap().new_post.submitting);
    settle(&mut app, 1);

    let state = app.community().unwrap();
    assert_eq!(state.posts.len(), 1);
    assert_eq!(state.posts[0].id, "created");
    assert_eq!(state.posts[0].title, "Train commute");
    assert_eq!(state.new_post.title, "");
    assert_eq!(state.new_post.caption, "");
    assert_eq!(state.new_post.image, None);
    assert!(!state.new_post.submitting);

    let sent = api
        .calls()
        .into_iter()
        .find_map(|call| match call {
            Call::CreatePost(input) => Some(input),
            _ => None,
        })
        .expect("create call");
    assert_eq!(sent.user_id, "u1");
    assert_eq!(sent.user_name, "Ada");
    assert_eq!(sent.caption, "Swapped the car for the train");
}

#[test]
fn failed_create_keeps_drafts() {
    let (api, _store, mut app) = mounted();
    api.fail("create_post");
    {
        let state = community(&mut app);
        state.new_post.title = "Train commute".into();
        state.new_post.caption = "Swapped the car".into();
        state.new_post.image = Some("/tmp/train.png".into());
    }
    app.submit_post();
    settle(&mut app, 1);

    let state = app.community().unwrap();
    assert_eq!(state.posts, feed());
    assert_eq!(state.new_post.title, "Train commute");
    assert_eq!(state.new_post.caption, "Swapped the car");
    assert_eq!(state.new_post.image, Some(PathBuf::from("/tmp/train.png")));
    assert_eq!(state.error, Some(RemoteFailure::CreatePost.to_string()));
}

#[test]
fn like_patches_only_the_target_count() {
    let (api, _store, mut app) = mounted();
    *api.like_count.lock().unwrap() = 7;

    app.like_post("p1");
    settle(&mut app, 1);

    let state = app.community().unwrap();
    let expected: Vec<Post> = feed()
        .into_iter()
        .map(|mut p| {
            if p.id == "p1" {
                p.likes = 7;
            }
            p
        })
        .collect();
    assert_eq!(state.posts, expected);
    assert!(state.liked_posts.contains("p1"));
    assert!(state.likes_pending.is_empty());
}

#[test]
fn second_like_is_refused_locally() {
    let (api, _store, mut app) = mounted();
    app.like_post("p2");
    settle(&mut app, 1);

    app.like_post("p2");
    assert_eq!(
        app.community().unwrap().notice.as_deref(),
        Some(ALREADY_LIKED)
    );
    assert!(quiet(&mut app));
    assert_eq!(api.count(|c| *c == Call::LikePost("p2".into())), 1);
}

#[test]
fn like_in_flight_is_not_resent() {
    let (api, _store, mut app) = mounted();
    app.like_post("p3");
    app.like_post("p3");
    settle(&mut app, 1);
    assert!(quiet(&mut app));
    assert_eq!(api.count(|c| *c == Call::LikePost("p3".into())), 1);
}

#[test]
fn failed_like_leaves_post_unliked() {
    let (api, _store, mut app) = mounted();
    api.fail("like_post");
    app.like_post("p1");
    settle(&mut app, 1);

    let state = app.community().unwrap();
    assert_eq!(state.posts[0].likes, 1);
    assert!(!state.liked_posts.contains("p1"));
    assert_eq!(state.error, Some(RemoteFailure::LikePost.to_string()));
}

#[test]
fn delete_removes_exactly_the_matching_post() {
    let (api, _store, mut app) = mounted();
    app.delete_post("p2");
    settle(&mut app, 1);

    let ids: Vec<_> = app
        .community()
        .unwrap()
        .posts
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    assert_eq!(api.count(|c| *c == Call::DeletePost("p2".into())), 1);
}

#[test]
fn failed_delete_keeps_the_post() {
    let (api, _store, mut app) = mounted();
    api.fail("delete_post");
    app.delete_post("p2");
    settle(&mut app, 1);

    let state = app.community().unwrap();
    assert_eq!(state.posts, feed());
    assert_eq!(state.error, Some(RemoteFailure::DeletePost.to_string()));
}

#[test]
fn inline_comment_takes_server_post() {
    let (api, _store, mut app) = mounted();
    let mut from_server = post("p1", "Bike week (edited)", 4);
    from_server.comments = vec!["first".into(), "Great ride".into()];
    *api.comment_response.lock().unwrap() = Some(from_server.clone());

    community(&mut app)
        .comment_drafts
        .insert("p1".into(), "Great ride".into());
    app.submit_comment("p1");
    settle(&mut app, 1);

    let state = app.community().unwrap();
    assert_eq!(state.posts[0], from_server);
    assert_eq!(state.posts[1..].to_vec(), feed()[1..].to_vec());
    assert!(!state.comment_drafts.contains_key("p1"));
    assert_eq!(
        api.count(|c| *c == Call::Comment("p1".into(), "Great ride".into())),
        1
    );
}

#[test]
fn failed_inline_comment_keeps_draft() {
    let (api, _store, mut app) = mounted();
    api.fail("comment");
    community(&mut app)
        .comment_drafts
        .insert("p1".into(), "Great ride".into());
    app.submit_comment("p1");
    settle(&mut app, 1);

    let state = app.community().unwrap();
    assert_eq!(
        state.comment_drafts.get("p1").map(String::as_str),
        Some("Great ride")
    );
    assert_eq!(state.posts, feed());
    assert_eq!(state.error, Some(RemoteFailure::AddComment.to_string()));
}

#[test]
fn drafts_of_removed_posts_are_dropped() {
    let (api, _store, mut app) = mounted();
    {
        let drafts = &mut community(&mut app).comment_drafts;
        drafts.insert("p2".into(), "bye".into());
        drafts.insert("p3".into(), "keep me".into());
    }
    app.delete_post("p2");
    settle(&mut app, 1);
    assert!(!app.community().unwrap().comment_drafts.contains_key("p2"));

    api.posts.lock().unwrap().retain(|p| p.id == "p1");
    app.refresh_posts();
    settle(&mut app, 1);
    assert!(app.community().unwrap().comment_drafts.is_empty());
}

#[test]
fn blank_inline_comment_is_rejected() {
    let (api, _store, mut app) = mounted();
    community(&mut app)
        .comment_drafts
        .insert("p1".into(), "   ".into());
    app.submit_comment("p1");
    app.submit_comment("p2");

    assert_eq!(
        app.community().unwrap().error,
        Some(DraftError::EmptyComment.to_string())
    );
    assert!(quiet(&mut app));
    assert_eq!(api.count(|c| matches!(c, Call::Comment(..))), 0);
}

#[test]
fn later_failure_overwrites_earlier_message() {
    let (api, _store, mut app) = mounted();
    community(&mut app).new_post.title.clear();
    app.submit_post();
    api.fail("delete_post");
    app.delete_post("p1");
    settle(&mut app, 1);
    assert_eq!(
        app.community().unwrap().error,
        Some(RemoteFailure::DeletePost.to_string())
    );
}

#[test]
fn view_comments_only_navigates() {
    let (api, _store, mut app) = mounted();
    let before = api.calls().len();
    app.view_comments("p3");
    settle(&mut app, 1);
    assert_eq!(
        app.route(),
        &Route::Comments {
            post_id: "p3".into()
        }
    );
    // The only new request is the comments page fetching its own post.
    assert_eq!(api.calls().len(), before + 1);
    assert_eq!(api.calls().last(), Some(&Call::GetPost("p3".into())));
}

#[test]
fn logout_clears_session_and_gates_next_visit() {
    let (api, store, mut app) = mounted();
    app.logout();

    assert_eq!(app.route(), &Route::Auth);
    assert!(app.session().is_none());
    assert_eq!(store.snapshot(), StoredSession::default());
    assert_eq!(store.load().unwrap(), None);

    let before = api.calls().len();
    app.navigate(Route::Community);
    assert_eq!(app.route(), &Route::Auth);
    assert_eq!(api.calls().len(), before);
}

#[test]
fn results_for_an_unmounted_page_are_ignored() {
    let api = FakeApi::new(feed());
    let store = signed_in_store();
    let mut app = start(&api, &store, Route::Community);
    app.navigate(Route::Home);
    settle(&mut app, 2);
    assert!(matches!(app.view(), ViewState::Home));

    app.navigate(Route::Community);
    app.navigate(Route::Community);
    settle(&mut app, 4);
    let state = app.community().unwrap();
    assert_eq!(state.posts, feed());
}

#[test]
fn refresh_restores_full_feed_after_create() {
    let (api, _store, mut app) = mounted();
    {
        let state = community(&mut app);
        state.new_post.title = "New".into();
        state.new_post.caption = "Post".into();
    }
    app.submit_post();
    settle(&mut app, 1);
    assert_eq!(app.community().unwrap().posts.len(), 1);

    app.refresh_posts();
    settle(&mut app, 1);
    assert_eq!(app.community().unwrap().posts, feed());
    assert_eq!(api.count(|c| *c == Call::ListPosts), 2);
}
