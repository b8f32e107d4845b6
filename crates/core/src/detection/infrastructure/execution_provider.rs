use ort::execution_providers::ExecutionProviderDispatch;

/// Preferred ONNX Runtime execution providers for this platform, in
/// priority order. ONNX Runtime falls back to CPU when none registers.
pub fn preferred_execution_providers() -> Vec<ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

/// Human-readable name of the accelerator used, for startup logs.
pub fn accelerator_name() -> &'static str {
    if cfg!(target_os = "macos") {
        "CoreML"
    } else if cfg!(target_os = "windows") {
        "DirectML"
    } else {
        "CPU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_list_matches_accelerator() {
        let providers = preferred_execution_providers();
        if accelerator_name() == "CPU" {
            assert!(providers.is_empty());
        } else {
            assert_eq!(providers.len(), 1);
        }
    }
}
