pub mod sysinfo_sampler;
