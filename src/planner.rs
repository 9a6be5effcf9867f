//! Execution planning: convert parsed CLI data into a job specification used by main.

use crate::config::{Command, Parameters};
use crate::error::PlannerError;
use crate::input::{self, DataSource, RecordSource, TokenPairStream};
use geofields::Predicate;
use tracing::debug;

pub enum ComputePlan {
    /// Per-record work. `filter` keeps only locations matching a planned box.
    Rows {
        records: TokenPairStream,
        command: Command,
        filter: Option<Predicate>,
    },
    /// A bounding box with nothing to filter: the predicate is the result.
    Predicate(Predicate),
}

pub struct OutputPlan {
    pub flush_each_record: bool,
}

pub fn build_job(
    source: DataSource,
    command: Command,
    params: &Parameters,
) -> Result<(ComputePlan, OutputPlan), PlannerError> {
    let flush_each_record = source.uses_stdin();

    let compute_plan = match source {
        DataSource::Records(records) => ComputePlan::Rows {
            records: input::read_token_pairs(records).map_err(PlannerError::from)?,
            command,
            filter: None,
        },
        DataSource::Within {
            bbox,
            locations: None,
        } => ComputePlan::Predicate(bbox.plan()),
        DataSource::Within {
            bbox,
            locations: Some(path),
        } => ComputePlan::Rows {
            records: input::read_token_pairs(RecordSource::File(path))
                .map_err(PlannerError::from)?,
            command: Command::Decode,
            filter: Some(bbox.plan()),
        },
    };

    debug!(
        %command,
        format = %params.output.format,
        flush_each_record,
        "built job"
    );

    let output_plan = OutputPlan { flush_each_record };
    Ok((compute_plan, output_plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofields::BoundingBox;

    #[test]
    fn test_within_without_file_plans_predicate() {
        let source = DataSource::Within {
            bbox: BoundingBox::new(10.0, 20.0, 30.0, 40.0),
            locations: None,
        };
        let (plan, output) = build_job(source, Command::Within, &Parameters::default()).unwrap();
        assert!(matches!(plan, ComputePlan::Predicate(_)));
        assert!(!output.flush_each_record);
    }

    #[test]
    fn test_inline_records_become_rows() {
        let source = DataSource::Records(RecordSource::Inline("1.5".into(), "2.5".into()));
        let (plan, _) = build_job(source, Command::Encode, &Parameters::default()).unwrap();
        let ComputePlan::Rows {
            records,
            command,
            filter,
        } = plan
        else {
            panic!("expected rows");
        };
        assert_eq!(command, Command::Encode);
        assert!(filter.is_none());
        assert_eq!(records.count(), 1);
    }
}
