//! js-i18n-sync
//!
//! JSON メッセージカタログを参照ロケールと比較し、不足しているキーを機械翻訳で補完する

pub mod catalog;
pub mod config;
pub mod diff;
pub mod flatten;
pub mod ir;
pub mod locale;
pub mod patch;
pub mod session;
pub mod translate;

pub use session::{
    SessionError,
    SyncSession,
};
