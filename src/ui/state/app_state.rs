use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::result::ProcessingResult;
use crate::domain::entities::upload::UploadedFile;

pub struct AppState {
    pub status: Signal<String>,
    pub upload: Signal<Option<UploadedFile>>,
    pub result: Signal<Option<ProcessingResult>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status: use_signal(|| "Ready".to_string()),
            upload: use_signal(|| None::<UploadedFile>),
            result: use_signal(|| None::<ProcessingResult>),
        }
    }
}
