use std::sync::mpsc::Sender;
use std::thread;

use log::error;

use crate::api::SharedApi;
use crate::models::{CreatePostInput, Credentials, SignupInput};
use crate::session::Session;

use super::messages::AppMessage;
use super::state::LoadedImage;

fn deliver(tx: &Sender<AppMessage>, message: AppMessage) {
    let label = message.label();
    if tx.send(message).is_err() {
        error!("failed to send {label} message");
    }
}

pub fn login(api: SharedApi, tx: Sender<AppMessage>, instance: u64, credentials: Credentials) {
    thread::spawn(move || {
        let result = api.login(&credentials);
        deliver(&tx, AppMessage::LoggedIn { instance, result });
    });
}

pub fn register(api: SharedApi, tx: Sender<AppMessage>, instance: u64, input: SignupInput) {
    thread::spawn(move || {
        let result = api.register(&input);
        deliver(&tx, AppMessage::SignedUp { instance, result });
    });
}

pub fn load_posts(api: SharedApi, tx: Sender<AppMessage>, instance: u64, session: Session) {
    thread::spawn(move || {
        let result = api.list_posts(&session);
        deliver(&tx, AppMessage::PostsLoaded { instance, result });
    });
}

pub fn load_profile(api: SharedApi, tx: Sender<AppMessage>, instance: u64, session: Session) {
    thread::spawn(move || {
        let result = api.get_profile(&session);
        deliver(&tx, AppMessage::ProfileLoaded { instance, result });
    });
}

pub fn create_post(
    api: SharedApi,
    tx: Sender<AppMessage>,
    instance: u64,
    session: Session,
    payload: CreatePostInput,
) {
    thread::spawn(move || {
        let result = api.create_post(&session, &payload);
        deliver(&tx, AppMessage::PostCreated { instance, result });
    });
}

pub fn like_post(
    api: SharedApi,
    tx: Sender<AppMessage>,
    instance: u64,
    session: Session,
    post_id: String,
) {
    thread::spawn(move || {
        let result = api.like_post(&session, &post_id);
        deliver(
            &tx,
            AppMessage::PostLiked {
                instance,
                post_id,
                result,
            },
        );
    });
}

pub fn delete_post(
    api: SharedApi,
    tx: Sender<AppMessage>,
    instance: u64,
    session: Session,
    post_id: String,
) {
    thread::spawn(move || {
        let result = api.delete_post(&session, &post_id);
        deliver(
            &tx,
            AppMessage::PostDeleted {
                instance,
                post_id,
                result,
            },
        );
    });
}

pub fn comment_on_post(
    api: SharedApi,
    tx: Sender<AppMessage>,
    instance: u64,
    session: Session,
    post_id: String,
    comment: String,
) {
    thread::spawn(move || {
        let result = api.comment_on_post(&session, &post_id, &comment);
        deliver(
            &tx,
            AppMessage::CommentAdded {
                instance,
                post_id,
                result,
            },
        );
    });
}

pub fn load_post(
    api: SharedApi,
    tx: Sender<AppMessage>,
    instance: u64,
    session: Session,
    post_id: String,
) {
    thread::spawn(move || {
        let result = api.get_post(&session, &post_id);
        deliver(
            &tx,
            AppMessage::PostLoaded {
                instance,
                post_id,
                result,
            },
        );
    });
}

/// Comment from the detail page. The submitted text rides along so the page
/// can append it without reading the response body.
pub fn add_detail_comment(
    api: SharedApi,
    tx: Sender<AppMessage>,
    instance: u64,
    session: Session,
    post_id: String,
    comment: String,
) {
    thread::spawn(move || {
        let result = api
            .comment_on_post(&session, &post_id, &comment)
            .map(|_| ());
        deliver(
            &tx,
            AppMessage::DetailCommentAdded {
                instance,
                post_id,
                comment,
                result,
            },
        );
    });
}

pub fn pick_image(tx: Sender<AppMessage>, instance: u64) {
    thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif"])
            .pick_file()
        {
            deliver(&tx, AppMessage::ImagePicked { instance, path });
        }
    });
}

pub fn download_image(api: SharedApi, tx: Sender<AppMessage>, url: String) {
    thread::spawn(move || {
        log::info!("Downloading image from URL: {url}");

        let result = (|| {
            let bytes = api
                .download_image(&url)
                .map_err(|e| format!("Request error: {e}"))?;
            let dyn_img =
                image::load_from_memory(&bytes).map_err(|e| format!("Image decode error: {e}"))?;
            let rgba = dyn_img.to_rgba8();
            let size = [dyn_img.width() as usize, dyn_img.height() as usize];
            Ok(LoadedImage {
                size,
                pixels: rgba.as_flat_samples().as_slice().to_vec(),
            })
        })();

        deliver(&tx, AppMessage::ImageLoaded { url, result });
    });
}
