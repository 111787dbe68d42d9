// fstabgen constants

// Where the generated table lands unless overridden
pub const DEFAULT_FSTAB_FILE: &str = "/etc/fstab";
pub const DEFAULT_YAML_FILE: &str = "./fstab.yaml";

// Optional TOML settings file
pub const CONFIG_FILE: &str = "/etc/fstabgen.toml";

// Backup directory, relative to the invoking user's home
pub const DEFAULT_BACKUP_SUBDIR: &str = "backups/fstab";

// fstab_<YYYYMMDD>_<HHMMSS>.bak, second resolution; lexicographic
// order of these names equals chronological order
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const BACKUP_PREFIX: &str = "fstab_";
pub const BACKUP_SUFFIX: &str = ".bak";

// Filesystem types the renderer recognizes; anything else is accepted
// with a warning
pub const KNOWN_FS_TYPES: &[&str] = &[
    "sysfs",
    "tmpfs",
    "bdev",
    "proc",
    "cgroup",
    "cgroup2",
    "cpuset",
    "devtmpfs",
    "configfs",
    "debugfs",
    "tracefs",
    "securityfs",
    "sockfs",
    "bpf",
    "pipefs",
    "ramfs",
    "hugetlbfs",
    "devpts",
    "ext2",
    "ext3",
    "ext4",
    "squashfs",
    "vfat",
    "ecryptfs",
    "fuseblk",
    "fuse",
    "fusectl",
    "efivarfs",
    "mqueue",
    "pstore",
    "autofs",
    "binfmt_misc",
    "vboxsf",
    "overlay",
    "none",
    "xfs",
    "nfs",
    "swap",
];

// Types that honor a root-reserve percentage
pub const RESERVE_CAPABLE_TYPES: &[&str] = &["ext2", "ext3", "ext4"];

// Journaled block filesystems get fsck ordering; everything else 0 0
pub const FSCK_ORDERED_TYPES: &[&str] = &["ext2", "ext3", "ext4", "xfs"];

pub const FSTAB_HEADER: &str = "\
# /etc/fstab: static file system information.
#
# Generated by fstabgen. Manual edits will be overwritten on the
# next run; change the YAML description instead.
#
# <device> <mountpoint> <type> <options> <dump> <pass>
";
