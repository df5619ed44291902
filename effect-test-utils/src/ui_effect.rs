// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// One-shot UI effect, the kind of value a view-model pushes through an effect flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UiEffect {
    Navigate { route: String },
    Toast { message: String },
    Dialog { title: String, body: String },
    Dismiss,
}

impl UiEffect {
    pub fn navigate(route: impl Into<String>) -> Self {
        Self::Navigate {
            route: route.into(),
        }
    }

    pub fn toast(message: impl Into<String>) -> Self {
        Self::Toast {
            message: message.into(),
        }
    }

    pub fn dialog(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Dialog {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[must_use]
pub fn navigate_home() -> UiEffect {
    UiEffect::navigate("home")
}

#[must_use]
pub fn navigate_settings() -> UiEffect {
    UiEffect::navigate("settings")
}

#[must_use]
pub fn toast_saved() -> UiEffect {
    UiEffect::toast("Saved")
}

#[must_use]
pub fn toast_offline() -> UiEffect {
    UiEffect::toast("You are offline")
}

#[must_use]
pub fn dialog_confirm_delete() -> UiEffect {
    UiEffect::dialog("Delete item?", "This cannot be undone.")
}
