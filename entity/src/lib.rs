pub mod accessory_design;
pub mod bundle;
pub mod content_item;
pub mod hardware_candidate;
pub mod launchpad_user;
pub mod legal_doc;
pub mod milestone;
pub mod milestone_checklist_item;
pub mod milestone_dependency;
pub mod pricing_plan;
pub mod project;
pub mod reward_rule;
pub mod risk;
pub mod runbook;
pub mod task;
pub mod task_attachment;
pub mod task_checklist_item;
pub mod task_comment;
pub mod workstream;

pub mod prelude {
    pub use super::accessory_design::Entity as AccessoryDesign;
    pub use super::bundle::Entity as Bundle;
    pub use super::content_item::Entity as ContentItem;
    pub use super::hardware_candidate::Entity as HardwareCandidate;
    pub use super::launchpad_user::Entity as LaunchpadUser;
    pub use super::legal_doc::Entity as LegalDoc;
    pub use super::milestone::Entity as Milestone;
    pub use super::milestone_checklist_item::Entity as MilestoneChecklistItem;
    pub use super::milestone_dependency::Entity as MilestoneDependency;
    pub use super::pricing_plan::Entity as PricingPlan;
    pub use super::project::Entity as Project;
    pub use super::reward_rule::Entity as RewardRule;
    pub use super::risk::Entity as Risk;
    pub use super::runbook::Entity as Runbook;
    pub use super::task::Entity as Task;
    pub use super::task_attachment::Entity as TaskAttachment;
    pub use super::task_checklist_item::Entity as TaskChecklistItem;
    pub use super::task_comment::Entity as TaskComment;
    pub use super::workstream::Entity as Workstream;
}
