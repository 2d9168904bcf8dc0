use crate::calendar::ProjectCalendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanMetadata {
    pub project_name: String,
    pub project_description: String,
    /// Day 0 of the plan; fixed milestone dates are measured from here.
    pub planning_epoch: NaiveDate,
}

impl Default for PlanMetadata {
    fn default() -> Self {
        Self {
            project_name: "Project Planning".to_string(),
            project_description: "No description".to_string(),
            planning_epoch: ProjectCalendar::default().epoch(),
        }
    }
}

impl PlanMetadata {
    pub fn calendar(&self) -> ProjectCalendar {
        ProjectCalendar::new(self.planning_epoch)
    }
}
