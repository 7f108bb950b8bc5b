/// How the device and swapchain are requested.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an `*Srgb` surface when one is offered.
    ///
    /// Off by default: sprite colors and blending are authored in gamma space
    /// and a `*Unorm` surface shows them as authored.
    pub prefer_srgb: bool,

    /// FIFO also syncs to vblank on top of the engine's own frame cap.
    pub present_mode: wgpu::PresentMode,

    /// Used only if the surface supports it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Swapchain depth hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
