// gfx/context.rs
use crate::error::ReplayError;

/// Headless GPU context shared by all environments. No surface is
/// created; render targets are offscreen textures owned by the sensors'
/// observation pipeline.
pub struct WindowlessContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_info: wgpu::AdapterInfo,
}

impl WindowlessContext {
    /// Create a context on the adapter selected by `gpu_device_id`.
    /// A negative id lets the instance pick a high-performance adapter.
    pub fn new(gpu_device_id: i32) -> Result<Self, ReplayError> {
        pollster::block_on(Self::new_async(gpu_device_id))
    }

    async fn new_async(gpu_device_id: i32) -> Result<Self, ReplayError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let adapter = if gpu_device_id >= 0 {
            let mut adapters = instance.enumerate_adapters(wgpu::Backends::all());
            let count = adapters.len();
            if gpu_device_id as usize >= count {
                return Err(ReplayError::Gpu(format!(
                    "gpu_device_id {} out of range, {} adapter(s) available",
                    gpu_device_id, count
                )));
            }
            adapters.swap_remove(gpu_device_id as usize)
        } else {
            instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .map_err(|e| ReplayError::Gpu(format!("no suitable adapter: {}", e)))?
        };

        let adapter_info = adapter.get_info();
        log::info!(
            "windowless context on adapter \"{}\" ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ReplayDevice"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| ReplayError::Gpu(format!("device request failed: {}", e)))?;

        Ok(Self {
            device,
            queue,
            adapter_info,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }
}
