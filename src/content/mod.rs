mod drafts;

pub use self::drafts::{ChatMessageDraft, DiyDraft, FaqDraft, LinkDraft, NewsDraft, RobotDraft};
