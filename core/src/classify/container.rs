//! Container membership from the process's cgroup.

/// Substrings of `/proc/<pid>/cgroup` that only appear inside containers.
const CGROUP_MARKERS: &[&str] = &["docker", "containerd", "kubepods", "libpod", "lxc"];

/// Whether `pid` runs inside a container. Always false off Linux.
pub async fn in_container(pid: i32) -> bool {
    #[cfg(target_os = "linux")]
    {
        in_container_at(std::path::Path::new("/proc"), pid).await
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = pid;
        false
    }
}

#[cfg(target_os = "linux")]
async fn in_container_at(proc_root: &std::path::Path, pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }
    match tokio::fs::read_to_string(proc_root.join(pid.to_string()).join("cgroup")).await {
        Ok(contents) => cgroup_indicates_container(&contents),
        Err(_) => false,
    }
}

/// Whether cgroup file contents name a container runtime.
pub fn cgroup_indicates_container(contents: &str) -> bool {
    CGROUP_MARKERS.iter().any(|marker| contents.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cgroup_markers() {
        assert!(cgroup_indicates_container(
            "0::/system.slice/docker-3f2a9c.scope\n"
        ));
        assert!(cgroup_indicates_container(
            "11:memory:/kubepods/burstable/pod1234/abcd\n"
        ));
        assert!(cgroup_indicates_container("0::/machine.slice/libpod-99.scope"));
        assert!(!cgroup_indicates_container("0::/user.slice/user-1000.slice/session-2.scope\n"));
        assert!(!cgroup_indicates_container(""));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_in_container_reads_cgroup_file() {
        let root = tempfile::tempdir().unwrap();
        let pid_dir = root.path().join("77");
        std::fs::create_dir(&pid_dir).unwrap();
        std::fs::write(pid_dir.join("cgroup"), "0::/system.slice/containerd.service\n").unwrap();

        assert!(in_container_at(root.path(), 77).await);
        assert!(!in_container_at(root.path(), 78).await);
        assert!(!in_container_at(root.path(), 0).await);
    }
}
