pub use sea_orm_migration::prelude::*;

mod m20250902_000001_launchpad_user;
mod m20250902_000002_project;
mod m20250902_000003_workstream;
mod m20250902_000004_task;
mod m20250902_000005_task_checklist_item;
mod m20250902_000006_task_comment;
mod m20250902_000007_task_attachment;
mod m20250902_000008_milestone;
mod m20250902_000009_milestone_checklist_item;
mod m20250902_000010_milestone_dependency;
mod m20250902_000011_risk;
mod m20250902_000012_hardware_candidate;
mod m20250902_000013_accessory_design;
mod m20250902_000014_bundle;
mod m20250902_000015_legal_doc;
mod m20250902_000016_pricing_plan;
mod m20250902_000017_reward_rule;
mod m20250902_000018_runbook;
mod m20250902_000019_content_item;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250902_000001_launchpad_user::Migration),
            Box::new(m20250902_000002_project::Migration),
            Box::new(m20250902_000003_workstream::Migration),
            Box::new(m20250902_000004_task::Migration),
            Box::new(m20250902_000005_task_checklist_item::Migration),
            Box::new(m20250902_000006_task_comment::Migration),
            Box::new(m20250902_000007_task_attachment::Migration),
            Box::new(m20250902_000008_milestone::Migration),
            Box::new(m20250902_000009_milestone_checklist_item::Migration),
            Box::new(m20250902_000010_milestone_dependency::Migration),
            Box::new(m20250902_000011_risk::Migration),
            Box::new(m20250902_000012_hardware_candidate::Migration),
            Box::new(m20250902_000013_accessory_design::Migration),
            Box::new(m20250902_000014_bundle::Migration),
            Box::new(m20250902_000015_legal_doc::Migration),
            Box::new(m20250902_000016_pricing_plan::Migration),
            Box::new(m20250902_000017_reward_rule::Migration),
            Box::new(m20250902_000018_runbook::Migration),
            Box::new(m20250902_000019_content_item::Migration),
        ]
    }
}
