//! Register convergence behavior against an in-memory controller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use calor::controller::{Controller, converge, temp_to_raw};
use calor::error::{CalorError, Result};

/// In-memory controller capturing every write
#[derive(Default)]
struct FakeController {
    registers: Mutex<HashMap<String, i64>>,
    writes: Mutex<Vec<(String, i64)>>,
    fail_reads: bool,
}

impl FakeController {
    fn with_registers(entries: &[(&str, i64)]) -> Self {
        let mut registers = HashMap::new();
        for (idx, value) in entries {
            registers.insert((*idx).to_string(), *value);
        }
        Self {
            registers: Mutex::new(registers),
            writes: Mutex::new(Vec::new()),
            fail_reads: false,
        }
    }

    fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl Controller for FakeController {
    async fn read_registers(&self) -> Result<HashMap<String, i64>> {
        if self.fail_reads {
            return Err(CalorError::controller("read failed"));
        }
        Ok(self.registers.lock().unwrap().clone())
    }

    async fn set_register(&self, idx: &str, value: i64) -> Result<()> {
        self.registers
            .lock()
            .unwrap()
            .insert(idx.to_string(), value);
        self.writes.lock().unwrap().push((idx.to_string(), value));
        Ok(())
    }
}

fn desired() -> Vec<(String, i64)> {
    vec![
        ("0208".to_string(), temp_to_raw(54.0)),
        ("2205".to_string(), 300),
        ("2207".to_string(), 10),
    ]
}

#[tokio::test]
async fn writes_only_mismatched_registers() {
    let controller = FakeController::with_registers(&[("0208", 350), ("2205", 300), ("2207", 10)]);
    let writes = converge(&controller, &desired()).await.unwrap();
    assert_eq!(writes, 1);
    assert_eq!(
        controller.writes.lock().unwrap()[0],
        ("0208".to_string(), 540)
    );
}

#[tokio::test]
async fn second_pass_issues_zero_writes() {
    let controller = FakeController::with_registers(&[("0208", 350), ("2205", 280), ("2207", 0)]);
    let first = converge(&controller, &desired()).await.unwrap();
    assert_eq!(first, 3);
    let second = converge(&controller, &desired()).await.unwrap();
    assert_eq!(second, 0);
    assert_eq!(controller.write_count(), 3);
}

#[tokio::test]
async fn missing_register_counts_as_mismatch() {
    let controller = FakeController::with_registers(&[("0208", 540), ("2205", 300)]);
    let writes = converge(&controller, &desired()).await.unwrap();
    assert_eq!(writes, 1);
    assert_eq!(
        controller.registers.lock().unwrap().get("2207"),
        Some(&10)
    );
}

#[tokio::test]
async fn read_failure_aborts_without_writes() {
    let controller = Arc::new(FakeController {
        fail_reads: true,
        ..FakeController::default()
    });
    let result = converge(controller.as_ref(), &desired()).await;
    assert!(result.is_err());
    assert_eq!(controller.write_count(), 0);
}
