//! Presence とルームメンバーシップの中核
//!
//! 「誰がオンラインか」「どのコネクションがどのルームにいるか」の唯一の
//! 情報源。どちらも同期的なただのマップで、サーバーは両者を [`ChatState`]
//! として 1 つの `tokio::sync::Mutex` の内側に保持します。これにより
//! すべての受信 intent は presence とメンバーシップを重ならない 1 つの
//! 作業単位として更新します。

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use super::value_object::{RoomName, Username};

/// デフォルトで提供される静的設定のトピックルーム
pub const DEFAULT_ROOMS: &[&str] = &["devops", "cloud computing", "covid19", "sports", "nodeJS"];

/// ライブな WebSocket コネクションの不透明な識別子。upgrade 時に採番されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しいコネクション識別子を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 「誰がオンラインか」を表すユーザー名 ↔ コネクションのマッピング
///
/// 不変条件: ユーザー名ごとに高々 1 エントリ、コネクションごとに高々
/// 1 ユーザー名。二次インデックス（コネクション → ユーザー名）は切断時の
/// 掃除を走査ではなくマップ参照にするために存在し、すべての更新で
/// 両マップを同時に更新します。
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    by_username: HashMap<Username, ConnectionId>,
    by_connection: HashMap<ConnectionId, Username>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `username` の presence エントリを挿入または上書き
    ///
    /// 後勝ち（last-registered-wins）: 同一ユーザー名の後からの登録は
    /// マッピングを新しいコネクションへ差し替えます。古いコネクションの
    /// 切断は行いません。両方向の古いペアを除去して 2 つのインデックスの
    /// 相互整合性を保ちます。
    pub fn register(&mut self, username: Username, connection: ConnectionId) {
        if let Some(stale_conn) = self.by_username.remove(&username) {
            self.by_connection.remove(&stale_conn);
        }
        if let Some(stale_user) = self.by_connection.remove(&connection) {
            self.by_username.remove(&stale_user);
        }
        self.by_username.insert(username.clone(), connection);
        self.by_connection.insert(connection, username);
    }

    /// `connection` が所有するエントリを除去し、解放されたユーザー名を返す
    ///
    /// 未登録コネクションの切断は no-op。
    pub fn unregister_by_connection(&mut self, connection: &ConnectionId) -> Option<Username> {
        let username = self.by_connection.remove(connection)?;
        self.by_username.remove(&username);
        Some(username)
    }

    /// `username` が現在所有するコネクション。`None` はオフライン。
    pub fn lookup(&self, username: &Username) -> Option<ConnectionId> {
        self.by_username.get(username).copied()
    }

    /// オンラインの全ユーザー名（昇順ソート）
    pub fn online_usernames(&self) -> Vec<Username> {
        let mut usernames: Vec<Username> = self.by_username.keys().cloned().collect();
        usernames.sort();
        usernames
    }
}

/// RoomTracker 上の join 遷移の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinTransition {
    /// 既に対象ルームに参加済み。何も変わらない。
    Unchanged,
    /// 未参加状態からルームに入った
    Entered,
    /// ルームを切り替えた。離れたルームを保持する。
    Switched(RoomName),
}

/// コネクションごとの現在ルーム。同時に高々 1 ルーム。
///
/// ルームは固定の設定済みセット。ルームのメンバーシップは現在ルームが
/// 一致するコネクションから導出されるため、同期を保つべき独立した
/// ルームエンティティは存在しません。
#[derive(Debug)]
pub struct RoomTracker {
    rooms: Vec<RoomName>,
    current: HashMap<ConnectionId, RoomName>,
}

impl RoomTracker {
    /// 設定済みルームセットの上に tracker を作成
    pub fn new(rooms: Vec<RoomName>) -> Self {
        Self {
            rooms,
            current: HashMap::new(),
        }
    }

    /// 設定済みルーム一覧（設定順）
    pub fn configured_rooms(&self) -> &[RoomName] {
        &self.rooms
    }

    /// `room` が設定済みルームの 1 つか
    pub fn is_configured(&self, room: &RoomName) -> bool {
        self.rooms.contains(room)
    }

    /// `connection` が現在参加しているルーム（あれば）
    pub fn room_of(&self, connection: &ConnectionId) -> Option<&RoomName> {
        self.current.get(connection)
    }

    /// `room` に現在参加している全コネクション
    pub fn members_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        self.current
            .iter()
            .filter(|(_, r)| *r == room)
            .map(|(conn, _)| *conn)
            .collect()
    }

    /// `connection` を `room` へ移動
    ///
    /// 参加中のルームへの再 join は冪等で `Unchanged` を報告します。
    /// `is_configured` の事前チェックは呼び出し側の責務で、未設定ルームは
    /// tracker に到達する前に棄却されなければなりません。
    pub fn join(&mut self, connection: ConnectionId, room: RoomName) -> JoinTransition {
        match self.current.insert(connection, room.clone()) {
            Some(old) if old == room => JoinTransition::Unchanged,
            Some(old) => JoinTransition::Switched(old),
            None => JoinTransition::Entered,
        }
    }

    /// `connection` を `room` から退室させる
    ///
    /// 現在ルームが指定ルームと正確に一致する場合のみ成功し、遷移が
    /// 起きたかどうかを返します。
    pub fn leave(&mut self, connection: &ConnectionId, room: &RoomName) -> bool {
        if self.current.get(connection) == Some(room) {
            self.current.remove(connection);
            true
        } else {
            false
        }
    }

    /// コネクションのメンバーシップを完全に除去（切断時の掃除）し、
    /// 参加していたルームを返す
    pub fn remove(&mut self, connection: &ConnectionId) -> Option<RoomName> {
        self.current.remove(connection)
    }
}

/// コーディネータの背後にある唯一の所有状態オブジェクト
///
/// presence とメンバーシップを 1 つのロックで守ることで、マルチスレッド
/// ランタイム上で intent が交錯しても両者の不変条件が保たれます。
#[derive(Debug)]
pub struct ChatState {
    pub presence: PresenceRegistry,
    pub rooms: RoomTracker,
}

impl ChatState {
    /// 設定済みルームセットの上にコーディネータ状態を作成
    pub fn new(rooms: Vec<RoomName>) -> Self {
        Self {
            presence: PresenceRegistry::new(),
            rooms: RoomTracker::new(rooms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn username(s: &str) -> Username {
        Username::new(s.to_string()).unwrap()
    }

    fn room(s: &str) -> RoomName {
        RoomName::new(s.to_string()).unwrap()
    }

    fn tracker(rooms: &[&str]) -> RoomTracker {
        RoomTracker::new(rooms.iter().map(|r| room(r)).collect())
    }

    #[test]
    fn test_register_then_lookup_returns_connection() {
        // テスト項目: register 後の lookup は登録したコネクションを返す
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        let conn = ConnectionId::generate();

        // when (操作):
        registry.register(username("alice"), conn);

        // then (期待する結果):
        assert_eq!(registry.lookup(&username("alice")), Some(conn));
    }

    #[test]
    fn test_register_last_wins() {
        // テスト項目: 同一ユーザー名の再登録は後勝ちでマッピングを差し替える
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();
        registry.register(username("alice"), first);

        // when (操作):
        registry.register(username("alice"), second);

        // then (期待する結果): lookup は常に最後に登録されたコネクションを返す
        assert_eq!(registry.lookup(&username("alice")), Some(second));
        // 古いコネクションの逆引きは消えている（切断時に alice を解放しない）
        assert_eq!(registry.unregister_by_connection(&first), None);
        assert_eq!(registry.lookup(&username("alice")), Some(second));
    }

    #[test]
    fn test_register_same_connection_new_username() {
        // テスト項目: 同一コネクションが別名で再登録した場合、旧エントリは残らない
        let mut registry = PresenceRegistry::new();
        let conn = ConnectionId::generate();
        registry.register(username("alice"), conn);
        registry.register(username("alice2"), conn);

        assert_eq!(registry.lookup(&username("alice")), None);
        assert_eq!(registry.lookup(&username("alice2")), Some(conn));
        assert_eq!(registry.online_usernames(), vec![username("alice2")]);
    }

    #[test]
    fn test_unregister_by_connection_frees_username() {
        // テスト項目: 切断処理でエントリが消え、オンライン一覧からも除外される
        // given (前提条件):
        let mut registry = PresenceRegistry::new();
        let conn = ConnectionId::generate();
        registry.register(username("alice"), conn);

        // when (操作):
        let freed = registry.unregister_by_connection(&conn);

        // then (期待する結果):
        assert_eq!(freed, Some(username("alice")));
        assert_eq!(registry.lookup(&username("alice")), None);
        assert!(registry.online_usernames().is_empty());
    }

    #[test]
    fn test_unregister_unknown_connection_is_noop() {
        // テスト項目: 未登録コネクションの切断は no-op
        let mut registry = PresenceRegistry::new();
        registry.register(username("alice"), ConnectionId::generate());

        let freed = registry.unregister_by_connection(&ConnectionId::generate());

        assert_eq!(freed, None);
        assert_eq!(registry.online_usernames(), vec![username("alice")]);
    }

    #[test]
    fn test_online_usernames_sorted_ascending() {
        // テスト項目: オンラインユーザー一覧は昇順ソートされる
        let mut registry = PresenceRegistry::new();
        registry.register(username("carol"), ConnectionId::generate());
        registry.register(username("alice"), ConnectionId::generate());
        registry.register(username("bob"), ConnectionId::generate());

        assert_eq!(
            registry.online_usernames(),
            vec![username("alice"), username("bob"), username("carol")]
        );
    }

    #[test]
    fn test_tracker_join_from_unjoined() {
        // テスト項目: 未参加状態からの join は Entered
        let mut tracker = tracker(&["devops", "sports"]);
        let conn = ConnectionId::generate();

        let transition = tracker.join(conn, room("devops"));

        assert_eq!(transition, JoinTransition::Entered);
        assert_eq!(tracker.room_of(&conn), Some(&room("devops")));
        assert_eq!(tracker.members_of(&room("devops")), vec![conn]);
    }

    #[test]
    fn test_tracker_join_switches_rooms() {
        // テスト項目: 別ルームへの join は旧ルームからの離脱を伴う
        let mut tracker = tracker(&["devops", "sports"]);
        let conn = ConnectionId::generate();
        tracker.join(conn, room("devops"));

        let transition = tracker.join(conn, room("sports"));

        assert_eq!(transition, JoinTransition::Switched(room("devops")));
        assert_eq!(tracker.room_of(&conn), Some(&room("sports")));
        assert!(tracker.members_of(&room("devops")).is_empty());
    }

    #[test]
    fn test_tracker_join_same_room_is_idempotent() {
        // テスト項目: 参加中のルームへの再 join は状態を変えない
        let mut tracker = tracker(&["devops"]);
        let conn = ConnectionId::generate();
        tracker.join(conn, room("devops"));

        let transition = tracker.join(conn, room("devops"));

        assert_eq!(transition, JoinTransition::Unchanged);
        assert_eq!(tracker.members_of(&room("devops")), vec![conn]);
    }

    #[test]
    fn test_tracker_leave_requires_exact_room() {
        // テスト項目: leave は現在のルームと一致する場合のみ成功する
        let mut tracker = tracker(&["devops", "sports"]);
        let conn = ConnectionId::generate();
        tracker.join(conn, room("devops"));

        assert!(!tracker.leave(&conn, &room("sports")));
        assert_eq!(tracker.room_of(&conn), Some(&room("devops")));

        assert!(tracker.leave(&conn, &room("devops")));
        assert_eq!(tracker.room_of(&conn), None);
    }

    #[test]
    fn test_tracker_leave_unjoined_is_rejected() {
        // テスト項目: 未参加コネクションの leave は失敗する
        let mut tracker = tracker(&["devops"]);
        let conn = ConnectionId::generate();

        assert!(!tracker.leave(&conn, &room("devops")));
    }

    #[test]
    fn test_tracker_remove_returns_current_room() {
        // テスト項目: 切断時の remove は所属ルームを返す
        let mut tracker = tracker(&["devops"]);
        let conn = ConnectionId::generate();
        tracker.join(conn, room("devops"));

        assert_eq!(tracker.remove(&conn), Some(room("devops")));
        assert_eq!(tracker.remove(&conn), None);
    }

    #[test]
    fn test_tracker_members_of_multiple_connections() {
        // テスト項目: members_of は該当ルームの全コネクションを返す
        let mut tracker = tracker(&["devops", "sports"]);
        let c1 = ConnectionId::generate();
        let c2 = ConnectionId::generate();
        let c3 = ConnectionId::generate();
        tracker.join(c1, room("devops"));
        tracker.join(c2, room("devops"));
        tracker.join(c3, room("sports"));

        let members = tracker.members_of(&room("devops"));
        assert_eq!(members.len(), 2);
        assert!(members.contains(&c1));
        assert!(members.contains(&c2));
        assert!(!members.contains(&c3));
    }

    #[test]
    fn test_tracker_is_configured() {
        // テスト項目: 設定済みルームの判定
        let tracker = tracker(&["devops"]);
        assert!(tracker.is_configured(&room("devops")));
        assert!(!tracker.is_configured(&room("random")));
    }
}
